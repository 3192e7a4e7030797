//! In-memory table model shared by the reader, normalizer and writer

use std::fmt;

use chrono::NaiveDate;

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    /// Typed non-text value inferred by the reader
    Number(f64),
    Date(NaiveDate),
    Empty,
}

impl fmt::Display for CellValue {
    /// Delimited-text rendering: dates as ISO `YYYY-MM-DD`, empty as nothing.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

pub type Row = Vec<CellValue>;

/// Header plus data rows parsed from one source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    /// Number of data rows (header excluded).
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn has_header(&self) -> bool {
        !self.columns.is_empty()
    }

    /// Apply `f` to every cell, producing a new table.
    pub fn map_cells<F>(self, mut f: F) -> Table
    where
        F: FnMut(CellValue) -> CellValue,
    {
        let rows = self
            .rows
            .into_iter()
            .map(|row| row.into_iter().map(&mut f).collect())
            .collect();
        Table {
            columns: self.columns,
            rows,
        }
    }
}
