use std::path::PathBuf;

/// Scheduler behaviour switches.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Emit diagnostics for dropped records and failed consistency checks.
    pub log_errors: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { log_errors: true }
    }
}

impl SchedulerConfig {
    pub fn with_log_errors(mut self, log_errors: bool) -> Self {
        self.log_errors = log_errors;
        self
    }
}

/// Where and how reports are written.
///
/// Files land in `directory` as `report-<timestamp>-<NN>.<extension>`.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub directory: PathBuf,
    /// Extension without the leading dot
    pub extension: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("reports"),
            extension: "txt".to_string(),
        }
    }
}

impl ReportConfig {
    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }
}
