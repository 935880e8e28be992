//! Shared fixtures for the print-shop integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::io::Write;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use print_shop::config::SchedulerConfig;
use print_shop::scheduler::{Device, Job, JobState, ProcessingHook, Scheduler};
use tempfile::TempDir;

pub fn device_xml(name: &str, emission: i32, speed: i32) -> String {
    format!(
        "<DEVICE><name>{}</name><emission>{}</emission><speed>{}</speed></DEVICE>",
        name, emission, speed
    )
}

pub fn job_xml(number: i32, pages: i32) -> String {
    format!(
        "<JOB><jobNumber>{}</jobNumber><pageCount>{}</pageCount></JOB>",
        number, pages
    )
}

/// Wrap records in a `SYSTEM` root.
pub fn system_xml(records: &[String]) -> String {
    wrap("SYSTEM", records)
}

pub fn wrap(root: &str, records: &[String]) -> String {
    format!("<{root}>\n{}\n</{root}>", records.join("\n"))
}

/// Write `contents` to a file inside a fresh temporary directory.
///
/// The directory is removed when the returned guard is dropped.
pub fn write_temp(contents: impl AsRef<[u8]>) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("system.xml");
    std::fs::write(&path, contents).expect("Failed to write system file");
    (dir, path)
}

/// Scheduler with the given devices `(name, emission, speed)` and jobs
/// `(number, pages)`, built without going through the loader.
pub fn scheduler_with(devices: &[(&str, i32, i32)], jobs: &[(i32, i32)]) -> Scheduler {
    let mut scheduler = Scheduler::new(SchedulerConfig::default());
    for &(name, emission, speed) in devices {
        scheduler.add_device(Device::new(name, emission, speed));
    }
    for &(number, pages) in jobs {
        scheduler.add_job(Job::new(number, pages));
    }
    scheduler
}

/// What the hook saw on one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookCall {
    pub device: String,
    pub job: i32,
    pub state: JobState,
    pub queued_on_device: usize,
}

/// Hook that records every call it receives.
#[derive(Clone, Default)]
pub struct RecordingHook {
    pub calls: Rc<RefCell<Vec<HookCall>>>,
}

impl ProcessingHook for RecordingHook {
    fn process_job(&mut self, device: &Device, job: &Job) {
        self.calls.borrow_mut().push(HookCall {
            device: device.name().to_string(),
            job: job.number(),
            state: job.state(),
            queued_on_device: device.jobs().len(),
        });
    }
}

/// Run `f` with a `tracing` subscriber that writes into a buffer, and
/// return what was logged.
pub fn capture_logs<F: FnOnce()>(f: F) -> String {
    let buffer = Arc::new(Mutex::new(Vec::new()));
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || CaptureWriter(writer.clone()))
        .finish();

    tracing::subscriber::with_default(subscriber, f);

    let bytes = buffer.lock().unwrap().clone();
    String::from_utf8(bytes).expect("log output is utf-8")
}

struct CaptureWriter(Arc<Mutex<Vec<u8>>>);

impl Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
