//! Error types for srccat
//!
//! Only run-level failures live here. Per-file problems (stat, read, size)
//! are logged by the file processor and never become an `Error`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("specified directory does not exist: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("invalid exclude pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("failed to open git repository at {}: {source}", path.display())]
    Repository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("failed to read ignore file {}: {source}", path.display())]
    IgnoreFile {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("error walking the path {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to start progress reporter: {0}")]
    Progress(#[source] io::Error),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("error writing output: {0}")]
    Output(#[from] io::Error),
}

impl Error {
    pub(crate) fn walk(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Walk {
            path: path.into(),
            source,
        }
    }
}
