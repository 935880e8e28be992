use std::path::Path;

use serde::Serialize;

use crate::config::SchedulerConfig;
use crate::error::Result;
use crate::loader::{self, Document, Entry, ROOT_TAG};
use crate::scheduler::consistency::{self, Inconsistency};
use crate::scheduler::device::{Device, DeviceId};
use crate::scheduler::hook::{ProcessingHook, TracingHook};
use crate::scheduler::job::{Job, JobId};

/// A job bound to a device by [`Scheduler::assign_next`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub job: JobId,
    pub device: DeviceId,
}

/// What a single load added to the scheduler.
#[must_use = "the consistency result of a load should be checked"]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadOutcome {
    pub devices: usize,
    pub jobs: usize,
    /// Malformed records that were dropped
    pub dropped: usize,
    /// Elements with an unrecognized tag
    pub skipped: usize,
    pub consistent: bool,
}

/// Owns the devices and jobs of a print shop and dispatches jobs to the
/// least-loaded device.
///
/// Both collections are append-only; handles stay valid until [`clear`].
///
/// [`clear`]: Scheduler::clear
pub struct Scheduler {
    config: SchedulerConfig,
    devices: Vec<Device>,
    jobs: Vec<Job>,
    hook: Box<dyn ProcessingHook>,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("config", &self.config)
            .field("devices", &self.devices)
            .field("jobs", &self.jobs)
            .finish_non_exhaustive()
    }
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            devices: Vec::new(),
            jobs: Vec::new(),
            hook: Box::new(TracingHook),
        }
    }

    /// Replace the processing hook invoked on every assignment.
    pub fn with_hook(mut self, hook: impl ProcessingHook + 'static) -> Self {
        self.hook = Box::new(hook);
        self
    }

    pub fn log_errors(&self) -> bool {
        self.config.log_errors
    }

    pub fn set_log_errors(&mut self, log_errors: bool) {
        self.config.log_errors = log_errors;
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load the system description at `path`.
    ///
    /// # Errors
    ///
    /// Fails without touching the scheduler when the file cannot be read or
    /// is not a well-formed document. Malformed records do not fail the load;
    /// they are counted in [`LoadOutcome::dropped`].
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadOutcome> {
        let document = loader::read_document(path)?;
        Ok(self.ingest(document))
    }

    /// Same as [`load`](Scheduler::load) for an in-memory document.
    pub fn load_str(&mut self, text: &str) -> Result<LoadOutcome> {
        let document = loader::parse_document(text)?;
        Ok(self.ingest(document))
    }

    /// Append every valid record of `document`, then run the consistency check.
    pub fn ingest(&mut self, document: Document) -> LoadOutcome {
        if !document.has_expected_root() {
            tracing::warn!(
                root = %document.root,
                expected = ROOT_TAG,
                "Unexpected root element, reading its children anyway"
            );
        }

        let mut outcome = LoadOutcome::default();
        for entry in document.entries {
            match entry {
                Entry::Device(Ok(record)) => {
                    self.add_device(Device::new(record.name, record.emission, record.speed));
                    outcome.devices += 1;
                }
                Entry::Job(Ok(record)) => {
                    self.add_job(Job::new(record.number, record.page_count));
                    outcome.jobs += 1;
                }
                Entry::Device(Err(e)) | Entry::Job(Err(e)) => {
                    outcome.dropped += 1;
                    if self.config.log_errors {
                        tracing::error!(error = %e, "Record dropped");
                    }
                }
                Entry::Unrecognized(tag) => {
                    outcome.skipped += 1;
                    tracing::warn!(tag = %tag, "Unrecognized element skipped");
                }
            }
        }

        outcome.consistent = self.verify_consistency();
        tracing::debug!(
            devices = outcome.devices,
            jobs = outcome.jobs,
            dropped = outcome.dropped,
            skipped = outcome.skipped,
            consistent = outcome.consistent,
            "Document loaded"
        );
        outcome
    }

    pub fn add_device(&mut self, device: Device) -> DeviceId {
        self.devices.push(device);
        DeviceId(self.devices.len() - 1)
    }

    pub fn add_job(&mut self, job: Job) -> JobId {
        self.jobs.push(job);
        JobId(self.jobs.len() - 1)
    }

    /// Drop every device and job. Previously issued handles become invalid.
    pub fn clear(&mut self) {
        self.devices.clear();
        self.jobs.clear();
    }

    // =========================================================================
    // Consistency
    // =========================================================================

    /// `true` when all invariants hold. Logs the first violation if
    /// `log_errors` is set.
    pub fn verify_consistency(&self) -> bool {
        match self.check_consistency() {
            Ok(()) => true,
            Err(inconsistency) => {
                if self.config.log_errors {
                    tracing::error!(reason = %inconsistency, "Inconsistent printing system");
                }
                false
            }
        }
    }

    pub fn check_consistency(&self) -> std::result::Result<(), Inconsistency> {
        consistency::verify(&self.jobs, &self.devices)
    }

    // =========================================================================
    // Assignment
    // =========================================================================

    /// Device with the smallest load; the earliest one wins ties.
    pub fn least_loaded_device(&self) -> Option<DeviceId> {
        // min_by_key keeps the first of several equal minimums
        self.device_ids()
            .min_by_key(|id| self.devices[id.0].load(&self.jobs))
    }

    /// Bind the first queued job to the least-loaded device.
    ///
    /// Returns `None` when no job is queued.
    ///
    /// # Panics
    ///
    /// Panics if a job is queued but the scheduler has no devices.
    pub fn assign_next(&mut self) -> Option<Assignment> {
        let job_id = self.first_unprocessed_job()?;
        assert!(
            !self.devices.is_empty(),
            "cannot assign jobs without any devices"
        );
        let device_id = self.least_loaded_device()?;

        self.devices[device_id.0].push_job(job_id);
        let job = &mut self.jobs[job_id.0];
        job.bind(device_id);
        job.set_in_process();

        let device = &self.devices[device_id.0];
        let job = &self.jobs[job_id.0];
        tracing::debug!(
            job = job.number(),
            device = device.name(),
            load = device.load(&self.jobs),
            "Job assigned"
        );
        self.hook.process_job(device, job);

        Some(Assignment {
            job: job_id,
            device: device_id,
        })
    }

    /// Assign until the queue is empty.
    pub fn assign_all(&mut self) -> Vec<Assignment> {
        std::iter::from_fn(|| self.assign_next()).collect()
    }

    /// External completion signal for a job in process.
    ///
    /// Returns `false` for an unknown handle.
    ///
    /// # Panics
    ///
    /// Panics if the job is not in process.
    pub fn finish_job(&mut self, id: JobId) -> bool {
        match self.jobs.get_mut(id.0) {
            Some(job) => {
                job.set_finished();
                tracing::debug!(job = job.number(), "Job finished");
                true
            }
            None => false,
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.get(id.0)
    }

    pub fn job(&self, id: JobId) -> Option<&Job> {
        self.jobs.get(id.0)
    }

    pub fn device_load(&self, id: DeviceId) -> Option<i64> {
        self.device(id).map(|device| device.load(&self.jobs))
    }

    /// Report block for one device, as written by [`crate::report::render`].
    pub fn device_report(&self, id: DeviceId) -> Option<String> {
        self.device(id).map(|device| device.report(&self.jobs))
    }

    pub fn device_of(&self, id: JobId) -> Option<DeviceId> {
        self.job(id).and_then(Job::device)
    }

    pub fn first_device(&self) -> Option<DeviceId> {
        (!self.devices.is_empty()).then_some(DeviceId(0))
    }

    pub fn first_job(&self) -> Option<JobId> {
        (!self.jobs.is_empty()).then_some(JobId(0))
    }

    pub fn first_unfinished_job(&self) -> Option<JobId> {
        self.jobs
            .iter()
            .position(|job| !job.is_finished())
            .map(JobId)
    }

    /// First job that is neither in process nor finished.
    pub fn first_unprocessed_job(&self) -> Option<JobId> {
        self.jobs.iter().position(Job::is_queued).map(JobId)
    }

    pub fn unfinished_jobs(&self) -> Vec<JobId> {
        self.jobs
            .iter()
            .enumerate()
            .filter(|(_, job)| !job.is_finished())
            .map(|(index, _)| JobId(index))
            .collect()
    }

    pub fn device_ids(&self) -> impl Iterator<Item = DeviceId> {
        (0..self.devices.len()).map(DeviceId)
    }

    pub fn job_ids(&self) -> impl Iterator<Item = JobId> {
        (0..self.jobs.len()).map(JobId)
    }
}
