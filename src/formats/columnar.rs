//! Apache Parquet files

use parquet::file::reader::{FileReader, SerializedFileReader};
use parquet::record::Field;
use std::fs::File;
use std::path::Path;

use super::parse_error;
use crate::error::Result;
use crate::table::{Table, Value};

/// Read every row group of a parquet file
///
/// Nested fields (groups, lists, maps) are kept as their text rendering.
pub fn read(path: &Path, name: &str) -> Result<Table> {
    let file = File::open(path)?;
    let reader = SerializedFileReader::new(file).map_err(|e| parse_error(name, e))?;

    let columns: Vec<String> = reader
        .metadata()
        .file_metadata()
        .schema()
        .get_fields()
        .iter()
        .map(|field| field.name().to_string())
        .collect();
    let mut table = Table::with_columns(columns);

    let rows = reader
        .get_row_iter(None)
        .map_err(|e| parse_error(name, e))?;
    for row in rows {
        let row = row.map_err(|e| parse_error(name, e))?;
        table.push_row(row.get_column_iter().map(|(_, f)| field_value(f)).collect());
    }

    Ok(table)
}

fn field_value(field: &Field) -> Value {
    match field {
        Field::Null => Value::Null,
        Field::Bool(b) => Value::Bool(*b),
        Field::Byte(v) => Value::Int(i64::from(*v)),
        Field::Short(v) => Value::Int(i64::from(*v)),
        Field::Int(v) => Value::Int(i64::from(*v)),
        Field::Long(v) => Value::Int(*v),
        Field::UByte(v) => Value::Int(i64::from(*v)),
        Field::UShort(v) => Value::Int(i64::from(*v)),
        Field::UInt(v) => Value::Int(i64::from(*v)),
        Field::ULong(v) => i64::try_from(*v).map_or_else(|_| Value::Text(v.to_string()), Value::Int),
        Field::Float(v) => Value::Float(f64::from(*v)),
        Field::Double(v) => Value::Float(*v),
        Field::Str(s) => Value::Text(s.clone()),
        other => Value::Text(other.to_string()),
    }
}

/// A small two-column parquet file (year, score) with three rows
#[allow(clippy::unwrap_used)]
#[cfg(test)]
pub(crate) fn sample_file() -> Vec<u8> {
    use parquet::data_type::{DoubleType, Int32Type};
    use parquet::file::properties::WriterProperties;
    use parquet::file::writer::SerializedFileWriter;
    use parquet::schema::parser::parse_message_type;
    use std::sync::Arc;

    let schema = Arc::new(
        parse_message_type("message films { REQUIRED INT32 year; REQUIRED DOUBLE score; }")
            .unwrap(),
    );
    let props = Arc::new(WriterProperties::builder().build());

    let mut buf: Vec<u8> = Vec::new();
    let mut writer = SerializedFileWriter::new(&mut buf, schema, props).unwrap();
    let mut row_group = writer.next_row_group().unwrap();
    let mut index = 0;
    while let Some(mut column) = row_group.next_column().unwrap() {
        if index == 0 {
            column
                .typed::<Int32Type>()
                .write_batch(&[1995, 2006, 2009], None, None)
                .unwrap();
        } else {
            column
                .typed::<DoubleType>()
                .write_batch(&[8.3, 7.2, 8.2], None, None)
                .unwrap();
        }
        column.close().unwrap();
        index += 1;
    }
    row_group.close().unwrap();
    writer.close().unwrap();
    buf
}
