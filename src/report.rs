use std::path::PathBuf;

use chrono::{DateTime, Local};
use rand::Rng;

use crate::config::ReportConfig;
use crate::error::Result;
use crate::scheduler::Scheduler;

/// One block per device in collection order, separated by a blank line.
pub fn render(scheduler: &Scheduler) -> String {
    scheduler
        .device_ids()
        .filter_map(|id| scheduler.device_report(id))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// File name for a report written at `time`, e.g. `report-2024-02-29-142501-07.txt`.
pub fn file_name(time: &DateTime<Local>, disambiguator: u8, extension: &str) -> String {
    format!(
        "report-{}-{:02}.{}",
        time.format("%Y-%m-%d-%H%M%S"),
        disambiguator,
        extension
    )
}

/// Write the report for `scheduler` and return the path of the new file.
///
/// # Errors
///
/// Returns an error if the output directory cannot be created or the file
/// cannot be written.
pub fn write_report(scheduler: &Scheduler, config: &ReportConfig) -> Result<PathBuf> {
    std::fs::create_dir_all(&config.directory)?;

    let disambiguator = rand::thread_rng().gen_range(0..100);
    let path = config
        .directory
        .join(file_name(&Local::now(), disambiguator, &config.extension));
    std::fs::write(&path, render(scheduler))?;

    tracing::info!(path = %path.display(), devices = scheduler.devices().len(), "Report written");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn file_name_embeds_timestamp_and_two_digits() {
        let time = Local.with_ymd_and_hms(2024, 2, 29, 14, 5, 9).unwrap();
        assert_eq!(
            file_name(&time, 7, "txt"),
            "report-2024-02-29-140509-07.txt"
        );
    }

    #[test]
    fn render_empty_scheduler() {
        assert_eq!(render(&Scheduler::default()), "");
    }
}
