// Spreadsheet source import (xls, xlsx, xlsm, xlsb, ods)

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use chrono::{Duration, NaiveDate, NaiveDateTime};

use scorecard_report::{Cell, RawTable, ReportError};

/// Maximum number of cells to import (prevents DoS from huge files)
const MAX_CELLS: usize = 5_000_000;

/// Largest serial Excel can display (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Import the first worksheet of a workbook as a header-less grid.
///
/// Row and column indices are sheet-absolute: leading empty rows and columns
/// are kept as empty cells so a row index matches what the user sees.
pub fn import(path: &Path) -> Result<RawTable, ReportError> {
    let mut workbook: Sheets<_> = open_workbook_auto(path)
        .map_err(|e| ReportError::SourceRead(format!("failed to open spreadsheet: {e}")))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let Some(sheet_name) = sheet_names.first() else {
        return Err(ReportError::SourceRead("spreadsheet contains no sheets".into()));
    };
    if sheet_names.len() > 1 {
        tracing::info!(
            sheet = %sheet_name,
            ignored = sheet_names.len() - 1,
            "reading first worksheet only"
        );
    }

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| ReportError::SourceRead(format!("failed to read sheet '{sheet_name}': {e}")))?;

    // Range start offset (data may not begin at A1)
    let (start_row, start_col) = range.start().unwrap_or((0, 0));
    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row as usize];
    let mut total_cells = 0usize;

    'rows: for row in range.rows() {
        let mut cells = vec![Cell::Empty; start_col as usize];
        for data in row {
            if total_cells >= MAX_CELLS {
                tracing::warn!(limit = MAX_CELLS, "import stopped at cell limit");
                rows.push(cells);
                break 'rows;
            }
            cells.push(convert(data));
            total_cells += 1;
        }
        rows.push(cells);
    }

    tracing::debug!(sheet = %sheet_name, rows = rows.len(), "worksheet imported");
    Ok(RawTable::new(rows))
}

fn convert(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Bool(*b),
        // Error cells (#DIV/0!, #REF!, ...) carry no value
        Data::Error(_) => Cell::Empty,
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            excel_serial_to_datetime(serial).map_or(Cell::Number(serial), Cell::DateTime)
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

/// Convert an Excel serial (1900 date system) to a date-time.
///
/// Serials below 60 predate Excel's phantom 1900-02-29 and use a base one day later.
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }

    let days = serial.trunc() as i64;
    let seconds = (serial.fract() * 86_400.0).round() as i64;
    let base = if days < 60 {
        NaiveDate::from_ymd_opt(1899, 12, 31)?
    } else {
        NaiveDate::from_ymd_opt(1899, 12, 30)?
    };

    base.and_hms_opt(0, 0, 0)?
        .checked_add_signed(Duration::days(days) + Duration::seconds(seconds))
}
