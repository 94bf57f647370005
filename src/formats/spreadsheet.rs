//! Excel workbooks
//!
//! Only the first worksheet is read. Its first row is the header; blank header
//! cells are named after their position (`Unnamed: 3`).

use calamine::{Data, Reader, open_workbook_auto};
use std::path::Path;

use super::parse_error;
use crate::error::Result;
use crate::table::{Table, Value};

/// Read the first sheet of an `.xls`/`.xlsx` file
///
/// The staged path must keep the original extension; the workbook type is
/// detected from it.
pub fn read(path: &Path, name: &str) -> Result<Table> {
    let mut workbook = open_workbook_auto(path).map_err(|e| parse_error(name, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| parse_error(name, "workbook has no sheets"))?
        .map_err(|e| parse_error(name, e))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::default());
    };

    let columns = header.iter().enumerate().map(|(idx, cell)| match cell {
        Data::Empty => format!("Unnamed: {idx}"),
        other => other.to_string(),
    });
    let mut table = Table::with_columns(columns);

    for row in rows {
        table.push_row(row.iter().map(cell_value).collect());
    }

    Ok(table)
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => Value::Float(*f),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) => Value::Text(s.clone()),
        Data::Error(_) => Value::Null,
        other => Value::Text(other.to_string()),
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn test_cell_values() {
        assert_eq!(cell_value(&Data::Empty), Value::Null);
        assert_eq!(cell_value(&Data::Int(3)), Value::Int(3));
        assert_eq!(cell_value(&Data::Float(1.5)), Value::Float(1.5));
        assert_eq!(cell_value(&Data::Bool(true)), Value::Bool(true));
        assert_eq!(
            cell_value(&Data::String("x".into())),
            Value::Text("x".into())
        );
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let mut file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(b"this is not a zip archive").unwrap();

        let result = read(file.path(), "book.xlsx");
        assert!(matches!(result, Err(Error::Parse { .. })));
    }
}
