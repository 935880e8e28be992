pub mod config;
pub mod error;
pub mod loader;
pub mod report;
pub mod scheduler;

pub use error::{PrintShopError, Result};
pub use scheduler::Scheduler;
