// File I/O operations: review sources in, summaries out

pub mod csv;
pub mod export;
pub mod xlsx;

use std::path::Path;

use scorecard_report::{RawTable, ReportError};

/// Source formats recognised by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Spreadsheet,
    Delimited,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, ReportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Ok(Self::Spreadsheet),
            "csv" | "tsv" | "txt" => Ok(Self::Delimited),
            "" => Err(ReportError::SourceRead(format!(
                "{}: no file extension; expected .xls, .xlsx, .ods, .csv or .tsv",
                path.display()
            ))),
            other => Err(ReportError::SourceRead(format!(
                "{}: unsupported file type .{other}",
                path.display()
            ))),
        }
    }
}

/// Read a review export into a header-less grid.
///
/// Spreadsheets contribute their first worksheet. Delimited text is sniffed
/// for its delimiter; `.tsv` files are always tab-separated.
pub fn read_table(path: &Path) -> Result<RawTable, ReportError> {
    read_table_with_delimiter(path, None)
}

/// Like [`read_table`], forcing `delimiter` for delimited text.
pub fn read_table_with_delimiter(
    path: &Path,
    delimiter: Option<u8>,
) -> Result<RawTable, ReportError> {
    let table = match SourceFormat::from_path(path)? {
        SourceFormat::Spreadsheet => xlsx::import(path)?,
        SourceFormat::Delimited => {
            let is_tsv = path
                .extension()
                .is_some_and(|e| e.eq_ignore_ascii_case("tsv"));
            match (delimiter, is_tsv) {
                (Some(d), _) => csv::import_with_delimiter(path, d)?,
                (None, true) => csv::import_with_delimiter(path, b'\t')?,
                (None, false) => csv::import(path)?,
            }
        }
    };
    tracing::info!(path = %path.display(), rows = table.len(), "source read");
    Ok(table)
}
