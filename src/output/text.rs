//! Fenced text output
//!
//! Each file becomes a fenced block whose info string is its path:
//!
//! ````text
//!
//! ```src/main.rs
//! fn main() {}
//! ```
//! ````

use std::io::{self, Write};

use crate::scan::FileRecord;

pub fn write_text<W: Write>(out: &mut W, records: &[FileRecord]) -> io::Result<()> {
    for record in records {
        let content = record.content.as_deref().unwrap_or_default();
        write!(out, "\n```{}\n{}\n```\n", record.path, content)?;
    }
    Ok(())
}
