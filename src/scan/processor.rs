//! Per-file processing
//!
//! Every failure here is local to one file: it is logged, the file is left
//! out of the results, and the scan goes on.

use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, warn};

use crate::progress::ProgressSender;
use crate::safety::{self, Classification, MAX_FILE_SIZE};

use super::results::{FileRecord, ResultSet};

/// Why a dispatched file produced no record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Stat,
    NotAFile,
    Oversize(u64),
    Read,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Record(FileRecord),
    Skipped(SkipReason),
}

/// Stat, read and classify one file.
///
/// The size is checked again here because the file may have changed since
/// its directory was listed. When `read_content` is false the file is only
/// stat'ed, never opened.
pub fn process_file(path: &Path, rel_path: &str, read_content: bool) -> Outcome {
    let metadata = match fs::metadata(path) {
        Ok(m) => m,
        Err(err) => {
            warn!("Error getting file info for {}: {}", path.display(), err);
            return Outcome::Skipped(SkipReason::Stat);
        }
    };

    if !metadata.is_file() {
        warn!("Skipping {}: not a regular file", path.display());
        return Outcome::Skipped(SkipReason::NotAFile);
    }

    if safety::is_oversize(metadata.len()) {
        warn!(
            "Skipping large file: {} (size: {} bytes)",
            path.display(),
            metadata.len()
        );
        return Outcome::Skipped(SkipReason::Oversize(metadata.len()));
    }

    if !read_content {
        return Outcome::Record(FileRecord::new(rel_path, None));
    }

    let bytes = match read_capped(path) {
        Ok(b) => b,
        Err(err) => {
            warn!("Failed to read file {}: {}", path.display(), err);
            return Outcome::Skipped(SkipReason::Read);
        }
    };

    let content = match safety::classify(bytes.len() as u64, &bytes) {
        Classification::Oversize => {
            warn!("Skipping large file: {} (grew while scanning)", path.display());
            return Outcome::Skipped(SkipReason::Oversize(bytes.len() as u64));
        }
        Classification::Binary => {
            debug!("{}: binary content omitted", rel_path);
            None
        }
        Classification::Text => Some(
            String::from_utf8(bytes)
                .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned()),
        ),
    };

    Outcome::Record(FileRecord::new(rel_path, content))
}

#[cfg(test)]
thread_local! {
    /// Files opened for reading on this thread.
    static OPENED: std::cell::Cell<usize> = const { std::cell::Cell::new(0) };
}

/// Read at most one byte past the cap, enough to tell a file has grown.
fn read_capped(path: &Path) -> std::io::Result<Vec<u8>> {
    #[cfg(test)]
    OPENED.with(|opened| opened.set(opened.get() + 1));

    let mut bytes = Vec::new();
    File::open(path)?
        .take(MAX_FILE_SIZE + 1)
        .read_to_end(&mut bytes)?;
    Ok(bytes)
}

/// Runs [`process_file`] for dispatched files, storing records and
/// reporting progress.
pub struct FileProcessor<'a> {
    read_content: bool,
    results: &'a ResultSet,
    progress: &'a ProgressSender,
    skipped: AtomicUsize,
}

impl<'a> FileProcessor<'a> {
    pub fn new(read_content: bool, results: &'a ResultSet, progress: &'a ProgressSender) -> Self {
        Self {
            read_content,
            results,
            progress,
            skipped: AtomicUsize::new(0),
        }
    }

    pub fn process(&self, path: &Path, rel_path: &str) {
        match process_file(path, rel_path, self.read_content) {
            Outcome::Record(record) => self.results.append(record),
            Outcome::Skipped(_) => {
                self.skipped.fetch_add(1, Ordering::Relaxed);
            }
        }
        self.progress.notify(rel_path);
    }

    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::Relaxed)
    }
}
