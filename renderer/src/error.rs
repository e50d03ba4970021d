use thiserror::Error;

/// Why a placeholder's source file could not be supplied.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no source available for '{0}'")]
    Missing(String),
}
