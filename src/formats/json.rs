//! JSON documents in the common dataframe layouts
//!
//! Accepted shapes:
//! - records: `[{"a": 1, "b": 2}, ...]`
//! - values: `[[1, 2], ...]` (columns named `0`, `1`, ...)
//! - columns: `{"a": {"0": 1, "1": 2}, ...}` (index keys give row order)
//! - lists: `{"a": [1, 2], ...}`

use serde_json::{Map, Value as Json};
use std::collections::BTreeMap;
use std::path::Path;

use super::parse_error;
use crate::error::Result;
use crate::table::{Table, Value};

/// Read a JSON file into a table
pub fn read(path: &Path, name: &str) -> Result<Table> {
    let content = std::fs::read(path)?;
    let document: Json = serde_json::from_slice(&content).map_err(|e| parse_error(name, e))?;
    from_json(document, name)
}

/// Convert an already-parsed JSON document into a table
pub fn from_json(document: Json, name: &str) -> Result<Table> {
    match document {
        Json::Array(items) => from_array(items, name),
        Json::Object(map) => from_object(map, name),
        _ => Err(parse_error(name, "expected a JSON array or object")),
    }
}

fn from_array(items: Vec<Json>, name: &str) -> Result<Table> {
    let first = items.first().map(|v| (v.is_object(), v.is_array()));
    match first {
        None => Ok(Table::default()),
        Some((true, _)) => from_records(items, name),
        Some((_, true)) => from_values(items, name),
        Some(_) => {
            let mut table = Table::with_columns(["0"]);
            for item in items {
                table.push_row(vec![Value::from(item)]);
            }
            Ok(table)
        }
    }
}

fn from_records(items: Vec<Json>, name: &str) -> Result<Table> {
    let mut columns: Vec<String> = Vec::new();
    let mut records = Vec::with_capacity(items.len());

    for item in items {
        let Json::Object(record) = item else {
            return Err(parse_error(name, "mixed records and non-records in array"));
        };
        for key in record.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        records.push(record);
    }

    let mut table = Table::with_columns(columns.clone());
    for mut record in records {
        let row = columns
            .iter()
            .map(|c| record.remove(c).map(Value::from).unwrap_or_default())
            .collect();
        table.push_row(row);
    }
    Ok(table)
}

fn from_values(items: Vec<Json>, name: &str) -> Result<Table> {
    let width = items
        .iter()
        .map(|item| match item {
            Json::Array(values) => Ok(values.len()),
            _ => Err(parse_error(name, "mixed rows and non-rows in array")),
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .max()
        .unwrap_or(0);

    let mut table = Table::with_columns((0..width).map(|i| i.to_string()));
    for item in items {
        if let Json::Array(values) = item {
            table.push_row(values.into_iter().map(Value::from).collect());
        }
    }
    Ok(table)
}

fn from_object(map: Map<String, Json>, name: &str) -> Result<Table> {
    if map.values().all(Json::is_array) {
        return from_lists(map);
    }
    if map.values().all(Json::is_object) {
        return from_columns(map);
    }
    Err(parse_error(
        name,
        "object values must all be arrays or all be objects",
    ))
}

fn from_lists(map: Map<String, Json>) -> Result<Table> {
    let columns: Vec<String> = map.keys().cloned().collect();
    let lists: Vec<Vec<Json>> = map
        .into_iter()
        .map(|(_, v)| match v {
            Json::Array(values) => values,
            _ => Vec::new(),
        })
        .collect();
    let height = lists.iter().map(Vec::len).max().unwrap_or(0);

    let mut iters: Vec<_> = lists.into_iter().map(IntoIterator::into_iter).collect();
    let mut table = Table::with_columns(columns);
    for _ in 0..height {
        let row = iters
            .iter_mut()
            .map(|it| it.next().map(Value::from).unwrap_or_default())
            .collect();
        table.push_row(row);
    }
    Ok(table)
}

/// Index keys sort numerically when they are numbers, otherwise as text
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum IndexKey {
    Number(i64),
    Label(String),
}

impl From<&str> for IndexKey {
    fn from(s: &str) -> Self {
        s.parse()
            .map(IndexKey::Number)
            .unwrap_or_else(|_| IndexKey::Label(s.to_string()))
    }
}

fn from_columns(map: Map<String, Json>) -> Result<Table> {
    let columns: Vec<String> = map.keys().cloned().collect();
    let mut grid: BTreeMap<IndexKey, Vec<Value>> = BTreeMap::new();

    for (col_idx, (_, column)) in map.into_iter().enumerate() {
        let Json::Object(cells) = column else {
            continue;
        };
        for (index, cell) in cells {
            let row = grid
                .entry(IndexKey::from(index.as_str()))
                .or_insert_with(|| vec![Value::Null; columns.len()]);
            row[col_idx] = Value::from(cell);
        }
    }

    let mut table = Table::with_columns(columns);
    for (_, row) in grid {
        table.push_row(row);
    }
    Ok(table)
}
