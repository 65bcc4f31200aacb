//! JSON output formatting

use std::io::{self, Write};

use crate::scan::FileRecord;

/// Write all records as one pretty-printed JSON array.
///
/// `content` is left out of an element entirely when it is absent.
pub fn write_json<W: Write>(out: &mut W, records: &[FileRecord]) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, records).map_err(io::Error::other)?;
    writeln!(out)
}
