use std::collections::HashSet;

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// An untyped cell value as read from a spreadsheet or delimited file.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Missing marker: an empty cell or text that is blank after trimming.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// String form used for header matching, grouping keys, and previews.
    pub fn display(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => {
                // Integers without decimals
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Self::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            Self::DateTime(dt) => {
                if dt.num_seconds_from_midnight() == 0 {
                    dt.format("%Y-%m-%d").to_string()
                } else {
                    dt.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            }
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

/// Header-less grid of cells, exactly as the source reader produced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row, in cells.
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Per-row records
// ---------------------------------------------------------------------------

/// One data row after month fill, name parsing and score coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRecord {
    pub month: Option<String>,
    pub employee_id: String,
    pub name: String,
    pub score: f64,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One line of the monthly report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub month: Option<String>,
    pub employee_id: String,
    pub name: String,
    pub average_score: f64,
}

/// Headline counts shown alongside a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SummaryStats {
    pub raw_rows: usize,
    pub summary_rows: usize,
    pub unique_employees: usize,
}

impl SummaryStats {
    /// `raw_rows` counts data rows of the materialized table (header excluded).
    /// An empty EmployeeID counts as one distinct employee.
    pub fn compute(raw_rows: usize, summary: &[SummaryRow]) -> Self {
        let unique: HashSet<&str> = summary.iter().map(|r| r.employee_id.as_str()).collect();
        Self {
            raw_rows,
            summary_rows: summary.len(),
            unique_employees: unique.len(),
        }
    }
}
