use std::fmt::Write;

use serde::Serialize;

use crate::scheduler::job::{Job, JobId};

/// Handle to a device owned by a [`Scheduler`](crate::scheduler::Scheduler).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DeviceId(pub(crate) usize);

impl DeviceId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A printer with fixed characteristics and the jobs assigned to it.
#[derive(Debug, Clone, Serialize)]
pub struct Device {
    name: String,
    emission: i32,
    speed: i32,
    jobs: Vec<JobId>,
}

impl Device {
    pub fn new(name: impl Into<String>, emission: i32, speed: i32) -> Self {
        Self {
            name: name.into(),
            emission,
            speed,
            jobs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn emission(&self) -> i32 {
        self.emission
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    /// Assigned jobs in assignment order.
    pub fn jobs(&self) -> &[JobId] {
        &self.jobs
    }

    /// Sum of page counts over every assigned job, finished ones included.
    ///
    /// `jobs` is the job arena the handles point into. Never cached.
    pub(crate) fn load(&self, jobs: &[Job]) -> i64 {
        self.jobs
            .iter()
            .map(|id| i64::from(jobs[id.index()].page_count()))
            .sum()
    }

    /// Text block describing this device for the report.
    pub(crate) fn report(&self, jobs: &[Job]) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "Printer \"{}\"", self.name);
        let _ = writeln!(out, "* Emission: {} g/page", self.emission);
        let _ = writeln!(out, "* Speed: {} pages/minute", self.speed);
        let _ = writeln!(out, "* Load: {} pages", self.load(jobs));
        if self.jobs.is_empty() {
            let _ = write!(out, "* Jobs: none");
            return out;
        }
        let _ = write!(out, "* Jobs:");
        for id in &self.jobs {
            let job = &jobs[id.index()];
            let _ = write!(
                out,
                "\n  [#{}|{} pages|{}]",
                job.number(),
                job.page_count(),
                job.state()
            );
        }
        out
    }

    pub(crate) fn push_job(&mut self, job: JobId) {
        self.jobs.push(job);
    }
}
