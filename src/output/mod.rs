//! Result formatting
//!
//! - `text` - fenced blocks of path and content
//! - `json` - a JSON array of `{path, content}` objects
//! - `list` - bare relative paths

mod json;
mod list;
mod text;

use std::io::{self, BufWriter, Write};

use clap::ValueEnum;

use crate::scan::FileRecord;

pub use json::write_json;
pub use list::write_list;
pub use text::write_text;

/// Output format selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Path and content of every file as fenced blocks
    #[default]
    Text,
    /// JSON array of {path, content} objects
    Json,
    /// Relative paths only; file contents are never read
    List,
}

impl OutputFormat {
    /// Whether this format needs file contents at all.
    pub fn reads_content(self) -> bool {
        !matches!(self, OutputFormat::List)
    }
}

/// Render records in the given format.
pub fn write_output<W: Write>(
    out: &mut W,
    format: OutputFormat,
    records: &[FileRecord],
) -> io::Result<()> {
    match format {
        OutputFormat::Text => write_text(out, records),
        OutputFormat::Json => write_json(out, records),
        OutputFormat::List => write_list(out, records),
    }
}

/// Render records to stdout.
pub fn print_output(format: OutputFormat, records: &[FileRecord]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_output(&mut out, format, records)?;
    out.flush()
}
