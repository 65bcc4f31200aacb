//! Records produced by a scan and the store they are collected in

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

/// One surviving file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FileRecord {
    /// Root-relative path with `/` separators.
    pub path: String,
    /// Absent for binary files and path-only scans.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl FileRecord {
    pub fn new(path: impl Into<String>, content: Option<String>) -> Self {
        Self {
            path: path.into(),
            content,
        }
    }
}

/// Append-only record store shared by all workers.
///
/// Order is whatever order workers finished in.
#[derive(Debug, Default)]
pub struct ResultSet {
    records: Mutex<Vec<FileRecord>>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, record: FileRecord) {
        self.lock().push(record);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_records(self) -> Vec<FileRecord> {
        // A panicking worker cannot leave a half-pushed record behind.
        self.records
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> MutexGuard<'_, Vec<FileRecord>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn test_append_and_take() {
        let results = ResultSet::new();
        assert!(results.is_empty());

        results.append(FileRecord::new("a.txt", Some("hello".to_string())));
        results.append(FileRecord::new("b.bin", None));

        assert_eq!(results.len(), 2);
        let records = results.into_records();
        assert_eq!(records[0].path, "a.txt");
        assert_eq!(records[1].content, None);
    }

    #[test]
    fn test_concurrent_appends_lose_nothing() {
        let results = ResultSet::new();

        (0..1000).into_par_iter().for_each(|i| {
            results.append(FileRecord::new(format!("file_{}.rs", i), None));
        });

        let records = results.into_records();
        assert_eq!(records.len(), 1000);
        let unique: HashSet<_> = records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(unique.len(), 1000);
    }
}
