use crate::scheduler::device::Device;
use crate::scheduler::job::Job;

/// Called once per assignment, after the job is queued on the device and
/// marked in process.
pub trait ProcessingHook {
    fn process_job(&mut self, device: &Device, job: &Job);
}

/// Default hook: reports the hand-off through `tracing` and does nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHook;

impl ProcessingHook for TracingHook {
    fn process_job(&mut self, device: &Device, job: &Job) {
        tracing::info!(
            device = device.name(),
            job = job.number(),
            pages = job.page_count(),
            "Printer started processing job"
        );
    }
}
