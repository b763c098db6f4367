use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("Failed to watch {path}\nCause: {source}\nCheck that the directory exists and you have read permissions.")]
    WatchRoot {
        path: PathBuf,
        source: notify::Error,
    },

    #[error("File watcher failed: {0}")]
    Watcher(#[from] notify::Error),

    #[error("Invalid project marker '{marker}': {source}")]
    InvalidMarker {
        marker: String,
        source: glob::PatternError,
    },

    #[error("No project marker configured for the core project ({project})")]
    MissingCoreMarker { project: String },

    #[error("Failed to install shutdown signal handler: {0}")]
    Signal(std::io::Error),
}

pub type Result<T> = std::result::Result<T, MirrorError>;
