//! Size and binary-content checks applied to every processed file
//!
//! Both checks are heuristics, not format detection: a NUL-free prefix does
//! not prove a file is text, and a file with a NUL past the sample is still
//! read as text.

/// Files strictly larger than this (1 MiB) are skipped entirely.
pub const MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Only this many leading bytes are inspected for NUL bytes.
pub const BINARY_SAMPLE_LEN: usize = 1024;

/// Result of classifying a file's size and content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Larger than [`MAX_FILE_SIZE`]; no record is produced.
    Oversize,
    /// Contains a NUL byte in the sample; recorded without content.
    Binary,
    Text,
}

/// Check a size against the cap (uses > not >=).
pub fn is_oversize(size: u64) -> bool {
    size > MAX_FILE_SIZE
}

/// Check for a NUL byte within the first [`BINARY_SAMPLE_LEN`] bytes.
pub fn is_binary(content: &[u8]) -> bool {
    let sample = &content[..content.len().min(BINARY_SAMPLE_LEN)];
    sample.contains(&0)
}

/// Classify a file from its size and (full or partial) content.
///
/// Size is checked first, so an oversize file is never reported as binary.
pub fn classify(size: u64, content: &[u8]) -> Classification {
    if is_oversize(size) {
        Classification::Oversize
    } else if is_binary(content) {
        Classification::Binary
    } else {
        Classification::Text
    }
}
