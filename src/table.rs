//! In-memory tabular data
//!
//! Every supported file format is materialized into a [`Table`]: named
//! columns plus rows of loosely typed [`Value`] cells. It is intentionally
//! small; callers who want a full dataframe can build one from `columns` and
//! `rows`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cell
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Missing value (empty cell, NA, null)
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// Integer
    Int(i64),
    /// Floating point
    Float(f64),
    /// Anything else, kept as text
    Text(String),
}

impl Value {
    /// Infer a typed value from delimited text the way dataframe readers do
    pub fn infer(raw: &str) -> Self {
        let s = raw.trim();
        match s {
            "" | "NA" | "N/A" | "NaN" | "nan" | "null" | "NULL" | "None" => return Value::Null,
            "TRUE" | "True" | "true" => return Value::Bool(true),
            "FALSE" | "False" | "false" => return Value::Bool(false),
            _ => {}
        }
        if let Ok(i) = s.parse::<i64>() {
            return Value::Int(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return Value::Float(f);
        }
        Value::Text(raw.to_string())
    }

    /// True for [`Value::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map_or(Value::Null, Value::Float),
            },
            serde_json::Value::String(s) => Value::Text(s),
            nested @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                Value::Text(nested.to_string())
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("NA"),
            Value::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Named columns and rows of cells
///
/// Rows always have exactly `columns.len()` cells; short rows are padded with
/// [`Value::Null`] when built through [`Table::push_row`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Column names in file order
    pub columns: Vec<String>,
    /// Row-major cells
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Number of rows shown by the `Display` preview
    pub const PREVIEW_ROWS: usize = 5;

    /// Create an empty table with the given columns
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating to the column count
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    /// True when there are no columns and no rows
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.rows.is_empty()
    }

    /// Index of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of a column, top to bottom
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("Empty table");
        }

        let shown: Vec<Vec<String>> = self
            .rows
            .iter()
            .take(Self::PREVIEW_ROWS)
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &shown {
            for (w, cell) in widths.iter_mut().zip(row) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:>w$}"))
            .collect();
        writeln!(f, "{}", header.join("  "))?;

        for row in &shown {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(c, &w)| format!("{c:>w$}"))
                .collect();
            writeln!(f, "{}", line.join("  "))?;
        }

        let (rows, cols) = self.shape();
        if rows > shown.len() {
            writeln!(f, "...")?;
        }
        write!(f, "[{rows} rows x {cols} columns]")
    }
}
