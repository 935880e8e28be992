use std::collections::HashSet;

use crate::scheduler::device::Device;
use crate::scheduler::job::Job;

/// The first invariant violation found by [`verify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    NegativePageCount { job: i32, page_count: i32 },
    NegativeJobNumber { job: i32 },
    DuplicateJobNumber { job: i32 },
    NegativeEmission { device: String, emission: i32 },
    NegativeSpeed { device: String, speed: i32 },
}

impl std::fmt::Display for Inconsistency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Inconsistency::NegativePageCount { job, page_count } => {
                write!(f, "job {} has a negative page count ({})", job, page_count)
            }
            Inconsistency::NegativeJobNumber { job } => {
                write!(f, "job number {} is negative", job)
            }
            Inconsistency::DuplicateJobNumber { job } => {
                write!(f, "job number {} is used more than once", job)
            }
            Inconsistency::NegativeEmission { device, emission } => {
                write!(f, "device {} has a negative emission ({})", device, emission)
            }
            Inconsistency::NegativeSpeed { device, speed } => {
                write!(f, "device {} has a negative speed ({})", device, speed)
            }
        }
    }
}

/// Check the model invariants, stopping at the first violation.
///
/// Jobs are checked first, in collection order: page count, job number,
/// then uniqueness against the numbers seen so far. Devices follow:
/// emission, then speed.
pub fn verify(jobs: &[Job], devices: &[Device]) -> Result<(), Inconsistency> {
    let mut seen = HashSet::with_capacity(jobs.len());
    for job in jobs {
        if job.page_count() < 0 {
            return Err(Inconsistency::NegativePageCount {
                job: job.number(),
                page_count: job.page_count(),
            });
        }
        if job.number() < 0 {
            return Err(Inconsistency::NegativeJobNumber { job: job.number() });
        }
        if !seen.insert(job.number()) {
            return Err(Inconsistency::DuplicateJobNumber { job: job.number() });
        }
    }

    for device in devices {
        if device.emission() < 0 {
            return Err(Inconsistency::NegativeEmission {
                device: device.name().to_string(),
                emission: device.emission(),
            });
        }
        if device.speed() < 0 {
            return Err(Inconsistency::NegativeSpeed {
                device: device.name().to_string(),
                speed: device.speed(),
            });
        }
    }

    Ok(())
}
