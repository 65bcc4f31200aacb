//! srccat - print the source files of a directory, minus the noise
//!
//! Walks a tree, drops version-control metadata, build output, lockfiles,
//! environment files, ignored paths and user-excluded globs, then reads the
//! survivors in parallel and renders them as fenced text, JSON, or a path
//! list.

pub mod error;
pub mod filter;
pub mod git;
pub mod output;
pub mod progress;
pub mod safety;
pub mod scan;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Error, Result};
pub use filter::{CustomPatterns, ExclusionReason, ExclusionRules};
pub use git::GitignoreMatcher;
pub use output::{OutputFormat, print_output, write_output};
pub use progress::{ProgressReporter, ProgressSender};
pub use scan::{FileRecord, ResultSet, ScanConfig, ScanOutcome, ScanStats, Scanner};
