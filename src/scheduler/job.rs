use serde::Serialize;

use crate::scheduler::device::DeviceId;

/// Handle to a job owned by a [`Scheduler`](crate::scheduler::Scheduler).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct JobId(pub(crate) usize);

impl JobId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JobState {
    Queued,
    InProcess,
    Finished,
}

impl std::fmt::Display for JobState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobState::Queued => write!(f, "queued"),
            JobState::InProcess => write!(f, "in process"),
            JobState::Finished => write!(f, "finished"),
        }
    }
}

/// A print job.
///
/// State only moves forward: `Queued -> InProcess -> Finished`. Any other
/// transition is a caller bug and panics.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    number: i32,
    page_count: i32,
    state: JobState,
    device: Option<DeviceId>,
}

impl Job {
    pub fn new(number: i32, page_count: i32) -> Self {
        Self {
            number,
            page_count,
            state: JobState::Queued,
            device: None,
        }
    }

    pub fn number(&self) -> i32 {
        self.number
    }

    pub fn page_count(&self) -> i32 {
        self.page_count
    }

    pub fn state(&self) -> JobState {
        self.state
    }

    /// Device the job was assigned to, if any.
    pub fn device(&self) -> Option<DeviceId> {
        self.device
    }

    pub fn is_queued(&self) -> bool {
        self.state == JobState::Queued
    }

    pub fn is_in_process(&self) -> bool {
        self.state == JobState::InProcess
    }

    pub fn is_finished(&self) -> bool {
        self.state == JobState::Finished
    }

    pub fn set_in_process(&mut self) {
        assert_eq!(
            self.state,
            JobState::Queued,
            "job {} must be queued before it is processed",
            self.number
        );
        self.state = JobState::InProcess;
    }

    pub fn set_finished(&mut self) {
        assert_eq!(
            self.state,
            JobState::InProcess,
            "job {} must be in process before it finishes",
            self.number
        );
        self.state = JobState::Finished;
    }

    pub(crate) fn bind(&mut self, device: DeviceId) {
        debug_assert!(self.device.is_none(), "job {} bound twice", self.number);
        self.device = Some(device);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_job_is_queued_and_unbound() {
        let job = Job::new(7, 12);
        assert_eq!(job.number(), 7);
        assert_eq!(job.page_count(), 12);
        assert!(job.is_queued());
        assert!(!job.is_in_process());
        assert!(!job.is_finished());
        assert!(job.device().is_none());
    }

    #[test]
    fn job_moves_through_every_state() {
        let mut job = Job::new(1, 3);
        job.set_in_process();
        assert_eq!(job.state(), JobState::InProcess);
        job.set_finished();
        assert_eq!(job.state(), JobState::Finished);
    }

    #[test]
    #[should_panic(expected = "must be in process")]
    fn queued_job_cannot_finish() {
        let mut job = Job::new(1, 3);
        job.set_finished();
    }

    #[test]
    #[should_panic(expected = "must be queued")]
    fn job_cannot_start_twice() {
        let mut job = Job::new(1, 3);
        job.set_in_process();
        job.set_in_process();
    }

    #[test]
    fn state_display() {
        assert_eq!(JobState::Queued.to_string(), "queued");
        assert_eq!(JobState::InProcess.to_string(), "in process");
        assert_eq!(JobState::Finished.to_string(), "finished");
    }
}
