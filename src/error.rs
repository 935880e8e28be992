use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrintShopError {
    #[error("Source unavailable: {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Malformed {tag} record: {reason}")]
    MalformedRecord { tag: String, reason: String },

    #[error("Report error: {0}")]
    Report(#[from] std::io::Error),
}

impl PrintShopError {
    pub fn malformed(tag: &str, reason: impl Into<String>) -> Self {
        PrintShopError::MalformedRecord {
            tag: tag.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PrintShopError>;
