//! User-supplied exclude globs

use glob::Pattern;

use crate::error::{Error, Result};

/// Exclude patterns compiled once at startup.
#[derive(Debug, Clone, Default)]
pub struct CustomPatterns(Vec<Pattern>);

impl CustomPatterns {
    /// Compile all patterns, failing on the first invalid one.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        patterns
            .iter()
            .map(|p| {
                let p = p.as_ref();
                Pattern::new(p).map_err(|source| Error::InvalidPattern {
                    pattern: p.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First pattern matching either the base name or the relative path.
    pub fn find_match(&self, name: &str, rel_path: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|p| p.matches(name) || p.matches(rel_path))
            .map(Pattern::as_str)
    }
}
