//! Configuration types for scanning

use std::path::PathBuf;

/// Configuration for one scan run.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub root: PathBuf,
    /// Read file contents. False for path-only listings, in which case no
    /// file is ever opened.
    pub read_content: bool,
    /// Extra shell globs to exclude, matched against base names and
    /// root-relative paths.
    pub exclude_patterns: Vec<String>,
    /// Number of worker threads.
    /// 0 = auto-detect (one per available core)
    /// N = use N worker threads
    pub jobs: usize,
    /// Write progress lines to stderr.
    pub show_progress: bool,
}

impl ScanConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            read_content: true,
            exclude_patterns: Vec::new(),
            jobs: 0,
            show_progress: true,
        }
    }
}
