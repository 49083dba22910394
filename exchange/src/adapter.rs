pub mod file;

use std::path::PathBuf;

#[derive(thiserror::Error, Debug, Clone)]
pub enum AdapterError {
    #[error("Failed to read {}: {reason}", path.display())]
    Io { path: PathBuf, reason: String },
    #[error("CSV error: {0}")]
    Csv(String),
    #[error("Missing required column {0:?}")]
    MissingColumn(&'static str),
    #[error("No records in {}", .0.display())]
    Empty(PathBuf),
}

impl From<csv::Error> for AdapterError {
    fn from(err: csv::Error) -> Self {
        match err.position() {
            Some(pos) => AdapterError::Csv(format!("line {}: {err}", pos.line())),
            None => AdapterError::Csv(err.to_string()),
        }
    }
}

/// Everything one load produced.
#[derive(Debug, Clone, Default)]
pub struct Fetched {
    pub records: Vec<crate::RawRecord>,
    /// Rows that could not be deserialized and were left out.
    pub skipped: usize,
}
