//! Comma- and tab-delimited text

use std::path::Path;

use super::parse_error;
use crate::error::Result;
use crate::table::{Table, Value};

/// Read a delimited file whose first record is the header
///
/// Short records are padded with nulls. A record with more fields than the
/// header is a parse error, as is invalid UTF-8.
pub fn read(path: &Path, delimiter: u8, name: &str) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| parse_error(name, e))?;

    let headers = reader.headers().map_err(|e| parse_error(name, e))?.clone();
    let mut table = Table::with_columns(headers.iter());

    for record in reader.records() {
        let record = record.map_err(|e| parse_error(name, e))?;
        if record.len() > headers.len() {
            let line = record.position().map_or(0, |p| p.line());
            return Err(parse_error(
                name,
                format!(
                    "line {line}: expected {} fields, saw {}",
                    headers.len(),
                    record.len()
                ),
            ));
        }
        table.push_row(record.iter().map(Value::infer).collect());
    }

    Ok(table)
}
