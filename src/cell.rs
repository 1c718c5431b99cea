//! FILENAME: src/cell.rs
//! PURPOSE: Defines the cell value model consumed by the CSV encoder.
//! CONTEXT: A cell has no identity beyond its position in the grid. The
//! encoder reads cells immutably; nothing here mutates the input.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::date_format::DateFormat;

/// A single cell value as consumed by the encoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    Date(DateTime<Local>),
    Json(serde_json::Value),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn number(value: f64) -> Self {
        CellValue::Number(value)
    }

    pub fn boolean(value: bool) -> Self {
        CellValue::Boolean(value)
    }

    pub fn date(value: DateTime<Local>) -> Self {
        CellValue::Date(value)
    }

    pub fn json(value: serde_json::Value) -> Self {
        CellValue::Json(value)
    }

    /// Returns the export text of the cell.
    /// This is the exact field content the encoder escapes and joins;
    /// the injection guard scans the same text.
    pub fn export_string(&self, date_format: &DateFormat) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => b.to_string(),
            CellValue::Date(d) => date_format.format(d),
            CellValue::Json(v) => serde_json::to_string(v).unwrap_or_default(),
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<DateTime<Local>> for CellValue {
    fn from(value: DateTime<Local>) -> Self {
        CellValue::Date(value)
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        CellValue::Json(value)
    }
}

/// `None` maps to an empty cell, mirroring null/absent values in the grid.
impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => v.into(),
            None => CellValue::Empty,
        }
    }
}
