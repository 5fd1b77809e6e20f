//! CSV input reading.
//!
//! Loads the whole export into memory as [`RawRow`]s keyed by header
//! name. Rows shorter than the header are accepted and simply lack the
//! trailing cells; extra trailing cells are ignored.

use crate::error::{NormalizerError, Result};
use crate::models::{RawRow, RawTable};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;

const UTF8_BOM: char = '\u{feff}';

/// Read every data row of the CSV file at `path`
pub fn read_raw_table(path: &Path) -> Result<RawTable> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => NormalizerError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => NormalizerError::io(path, e),
    })?;

    let table = read_raw_table_from(file).map_err(|e| NormalizerError::csv(path, e))?;

    debug!(
        "Read {} rows with {} columns from {}",
        table.rows.len(),
        table.headers.len(),
        path.display()
    );

    Ok(table)
}

/// Read every data row from any CSV source
///
/// Invalid UTF-8 and broken quoting surface as `csv::Error`.
pub fn read_raw_table_from<R: Read>(source: R) -> std::result::Result<RawTable, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(index, header)| {
            if index == 0 {
                header.trim_start_matches(UTF8_BOM).to_string()
            } else {
                header.to_string()
            }
        })
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.as_str(), value))
            .collect();
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}
