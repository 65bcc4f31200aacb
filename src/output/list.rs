//! Path-only output

use std::io::{self, Write};

use crate::scan::FileRecord;

pub fn write_list<W: Write>(out: &mut W, records: &[FileRecord]) -> io::Result<()> {
    for record in records {
        writeln!(out, "{}", record.path)?;
    }
    Ok(())
}
