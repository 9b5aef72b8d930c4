//! CSV and JSON writers for projection tables

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use super::{flatten_rows, TableRow};
use crate::error::PpaError;

/// Writes a header record followed by one record per row.
///
/// Fields containing a comma, a double quote or a line break are quoted,
/// with embedded quotes doubled.
///
/// # Errors
///
/// Returns an error for unknown columns or if writing fails.
pub fn write_csv<R: TableRow, W: Write>(
    rows: &[R],
    headers: &[&str],
    writer: W,
) -> Result<(), PpaError> {
    let table = flatten_rows(rows, headers)?;
    write_table(headers, &table, writer)
}

fn write_table<W: Write>(headers: &[&str], table: &[Vec<String>], writer: W) -> Result<(), PpaError> {
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(headers)?;
    for record in table {
        wtr.write_record(record)?;
    }
    wtr.flush().map_err(csv::Error::from)?;

    Ok(())
}

/// Exports rows to a CSV file at `path`.
///
/// Columns are validated before the file is created, so a bad column list
/// leaves an existing file untouched.
pub fn export_csv<R: TableRow, P: AsRef<Path>>(
    rows: &[R],
    headers: &[&str],
    path: P,
) -> Result<(), PpaError> {
    let path = path.as_ref();
    let table = flatten_rows(rows, headers)?;

    let file = File::create(path).map_err(|source| PpaError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_table(headers, &table, BufWriter::new(file))?;

    log::info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

/// Pretty-printed JSON of any projection output
pub fn write_json<T: Serialize, W: Write>(value: &T, writer: W) -> Result<(), PpaError> {
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}
