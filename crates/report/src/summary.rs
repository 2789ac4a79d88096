use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ReportError;
use crate::model::{Cell, EmployeeRecord, SummaryRow};
use crate::table::NormalizedTable;

pub const MONTH_COLUMN: &str = "Month";
pub const NAME_COLUMN: &str = "Name";
pub const SCORE_COLUMN: &str = "Score";

fn employee_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bPPS\d+\b").expect("employee token pattern"))
}

fn employee_prefix() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\bPPS\d+\b\s*[-–]?\s*").expect("employee prefix pattern"))
}

// ---------------------------------------------------------------------------
// Field cleaning
// ---------------------------------------------------------------------------

/// `PPS` code embedded in a free-text name, upper-cased, or `""`.
pub fn extract_employee_id(name: &str) -> String {
    employee_token()
        .find(&name.to_uppercase())
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Strip the first `PPS` code and its trailing `-`/`–` separator from a name.
pub fn clean_employee_name(name: &str) -> String {
    employee_prefix().replacen(name, 1, "").trim().to_string()
}

/// Numeric score of a cell. Anything that is not a finite-or-infinite number
/// (blank, text, NaN, dates) counts as 0.
pub fn coerce_score(cell: &Cell) -> f64 {
    let value = match cell {
        Cell::Number(n) => Some(*n),
        Cell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Cell::Text(s) => s.trim().parse::<f64>().ok(),
        Cell::Empty | Cell::DateTime(_) => None,
    };
    value.filter(|n| !n.is_nan()).unwrap_or(0.0)
}

/// Replace each missing value with the nearest preceding present value.
/// Leading missing values stay missing.
pub fn forward_fill(values: &[Option<String>]) -> Vec<Option<String>> {
    let mut last: Option<&String> = None;
    values
        .iter()
        .map(|value| {
            if value.is_some() {
                last = value.as_ref();
            }
            last.cloned()
        })
        .collect()
}

/// Round half to even at two decimal places.
pub fn round_score(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

fn present(cell: &Cell) -> Option<String> {
    if cell.is_missing() {
        None
    } else {
        Some(cell.display())
    }
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

struct Columns {
    month: usize,
    name: usize,
    score: usize,
}

fn resolve_columns(table: &NormalizedTable) -> Result<Columns, ReportError> {
    let required = [MONTH_COLUMN, NAME_COLUMN, SCORE_COLUMN];
    let missing: Vec<String> = required
        .iter()
        .filter(|c| table.column_index(c).is_none())
        .map(|c| c.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(ReportError::Schema {
            missing,
            found: table.columns().to_vec(),
        });
    }

    // Presence checked above.
    let index = |name: &str| table.column_index(name).unwrap_or_default();
    Ok(Columns {
        month: index(MONTH_COLUMN),
        name: index(NAME_COLUMN),
        score: index(SCORE_COLUMN),
    })
}

/// Fill months, drop nameless rows, and parse each remaining row.
pub fn employee_records(table: &NormalizedTable) -> Result<Vec<EmployeeRecord>, ReportError> {
    let cols = resolve_columns(table)?;

    let months: Vec<Option<String>> = (0..table.len())
        .map(|row| present(table.cell(row, cols.month)))
        .collect();
    let months = forward_fill(&months);

    let records: Vec<EmployeeRecord> = months
        .into_iter()
        .enumerate()
        .filter_map(|(row, month)| {
            let name = present(table.cell(row, cols.name))?;
            Some(EmployeeRecord {
                month,
                employee_id: extract_employee_id(&name),
                name: clean_employee_name(&name),
                score: coerce_score(table.cell(row, cols.score)),
            })
        })
        .collect();

    tracing::debug!(
        rows = table.len(),
        kept = records.len(),
        dropped = table.len() - records.len(),
        "employee records parsed"
    );
    Ok(records)
}

/// Group key. Field order gives the report order: month (missing last),
/// then employee id, then name.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GroupKey {
    month_missing: bool,
    month: String,
    employee_id: String,
    name: String,
}

/// Average score per (month, employee id, name), sorted by that key.
pub fn aggregate(records: &[EmployeeRecord]) -> Vec<SummaryRow> {
    let mut groups: BTreeMap<GroupKey, Vec<f64>> = BTreeMap::new();

    for record in records {
        let key = GroupKey {
            month_missing: record.month.is_none(),
            month: record.month.clone().unwrap_or_default(),
            employee_id: record.employee_id.clone(),
            name: record.name.clone(),
        };
        groups.entry(key).or_default().push(record.score);
    }

    groups
        .into_iter()
        .map(|(key, mut scores)| {
            // Summation order must not depend on input row order.
            scores.sort_by(f64::total_cmp);
            let mean = scores.iter().sum::<f64>() / scores.len() as f64;
            SummaryRow {
                month: (!key.month_missing).then_some(key.month),
                employee_id: key.employee_id,
                name: key.name,
                average_score: round_score(mean),
            }
        })
        .collect()
}

/// Build the monthly per-employee report.
///
/// Fails only when `Month`, `Name` or `Score` is absent from the table's
/// columns. Bad scores, unmatched ids and leading blank months degrade to
/// 0, `""` and a null month respectively.
pub fn build_summary(table: &NormalizedTable) -> Result<Vec<SummaryRow>, ReportError> {
    let records = employee_records(table)?;
    let summary = aggregate(&records);
    tracing::debug!(groups = summary.len(), "summary built");
    Ok(summary)
}
