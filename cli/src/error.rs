use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {}", .path.display(), .error.message())]
    ConfigParse {
        path: PathBuf,
        /// Kept so the error can be shown against the offending span.
        text: String,
        #[source]
        error: toml::de::Error,
    },
    #[error("unable to read {}: {source}", .path.display())]
    ReadDocument {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to write to {}: {source}", .path.display())]
    WriteDocument {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CliError {
    /// Write failures are the only errors that fail a batch.
    pub fn is_fatal(&self) -> bool {
        matches!(self, CliError::WriteDocument { .. })
    }
}
