pub mod consistency;
pub mod device;
pub mod hook;
pub mod job;
pub mod system;

pub use consistency::Inconsistency;
pub use device::{Device, DeviceId};
pub use hook::{ProcessingHook, TracingHook};
pub use job::{Job, JobId, JobState};
pub use system::{Assignment, LoadOutcome, Scheduler};
