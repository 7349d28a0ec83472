use std::path::PathBuf;

use thiserror::Error as ThisError;

/// Errors that can occur in the logging library
#[derive(ThisError, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
    /// Diagnostics initialization failed.
    #[error("Initialization error: {0}")]
    Init(String),
    /// A size limit in megabytes does not fit the byte ceiling.
    #[error("size limit of {megabytes} MB exceeds the maximum of {} MB", crate::handle::MAX_SIZE_LIMIT_MB)]
    SizeOverflow {
        /// The rejected value.
        megabytes: u64,
    },
    /// Neither the requested path nor the fallback path could be opened.
    #[error("cannot create log {name:?}: {requested:?} and fallback {fallback:?} are not writable")]
    Create {
        /// Name of the log being created.
        name: Option<String>,
        /// The path the caller asked for.
        requested: PathBuf,
        /// The generated fallback path that was tried last.
        fallback: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The system log could not open its file.
    #[error("log system init error at {path:?}: {source}")]
    SystemLogInit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
