//! Summary output: delimited text and JSON.
//!
//! The delimited form is deterministic: fixed header, `\n` terminators, no
//! index column, and scores in shortest round-trip form (`85.0`, `84.33`).

use std::io::Write;

use scorecard_report::{ReportError, SummaryRow};

pub const SUMMARY_HEADER: [&str; 4] = ["Month", "EmployeeID", "Name", "Average Score"];

fn format_score(value: f64) -> String {
    // Debug keeps the trailing ".0" on whole numbers
    format!("{value:?}")
}

pub fn write_summary_csv(rows: &[SummaryRow], writer: impl Write) -> Result<(), ReportError> {
    let mut csv = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(SUMMARY_HEADER)
        .map_err(|e| ReportError::Io(format!("CSV write error: {e}")))?;

    for row in rows {
        csv.write_record([
            row.month.as_deref().unwrap_or(""),
            row.employee_id.as_str(),
            row.name.as_str(),
            format_score(row.average_score).as_str(),
        ])
        .map_err(|e| ReportError::Io(format!("CSV write error: {e}")))?;
    }

    csv.flush()
        .map_err(|e| ReportError::Io(format!("CSV flush error: {e}")))?;
    Ok(())
}

/// UTF-8 bytes of the delimited form, e.g. for a download payload.
pub fn to_csv_bytes(rows: &[SummaryRow]) -> Result<Vec<u8>, ReportError> {
    let mut buf = Vec::new();
    write_summary_csv(rows, &mut buf)?;
    Ok(buf)
}

pub fn write_summary_json(rows: &[SummaryRow], mut writer: impl Write) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut writer, rows)
        .map_err(|e| ReportError::Io(format!("JSON write error: {e}")))?;
    writeln!(writer).map_err(|e| ReportError::Io(e.to_string()))?;
    Ok(())
}

/// Parse the delimited form produced by [`write_summary_csv`].
///
/// An empty Month field reads back as a null month.
pub fn read_summary_csv(reader: impl std::io::Read) -> Result<Vec<SummaryRow>, ReportError> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = csv
        .headers()
        .map_err(|e| ReportError::SourceRead(format!("CSV parse error in header: {e}")))?;
    if headers.iter().ne(SUMMARY_HEADER) {
        return Err(ReportError::SourceRead(format!(
            "unexpected summary header: {}",
            headers.iter().collect::<Vec<_>>().join(",")
        )));
    }

    let mut rows = Vec::new();
    for (i, result) in csv.records().enumerate() {
        let record =
            result.map_err(|e| ReportError::SourceRead(format!("CSV parse error at row {}: {e}", i + 1)))?;

        if record.len() != SUMMARY_HEADER.len() {
            return Err(ReportError::SourceRead(format!(
                "row {} has {} columns, expected {}",
                i + 1,
                record.len(),
                SUMMARY_HEADER.len()
            )));
        }

        let average_score: f64 = record[3].parse().map_err(|e| {
            ReportError::SourceRead(format!("row {}: invalid average score '{}': {e}", i + 1, &record[3]))
        })?;

        rows.push(SummaryRow {
            month: (!record[0].is_empty()).then(|| record[0].to_string()),
            employee_id: record[1].to_string(),
            name: record[2].to_string(),
            average_score,
        });
    }

    Ok(rows)
}
