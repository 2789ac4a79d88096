//! `scorecard summarize | inspect | months`

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use scorecard_report::config::OutputFormat;
use scorecard_report::filter::{distinct_months, filter_by_month, search};
use scorecard_report::summary::{MONTH_COLUMN, NAME_COLUMN, SCORE_COLUMN};
use scorecard_report::{
    build_summary, detect_header, NormalizedTable, ReportConfig, ReportError, SummaryRow,
    SummaryStats,
};

use crate::render::{render_grid, render_summary_table};
use crate::{CliError, FormatArg, SourceArgs};

pub(crate) struct SummarizeArgs {
    pub source: SourceArgs,
    pub format: Option<FormatArg>,
    pub output: Option<PathBuf>,
    pub month: Option<String>,
    pub search: Option<String>,
    pub stats: bool,
    pub quiet: bool,
}

// ============================================================================
// Loading
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderSource {
    Detected,
    Fallback,
    Override,
}

struct Loaded {
    config: ReportConfig,
    header_row: usize,
    header_source: HeaderSource,
    table: NormalizedTable,
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("scorecard").join("config.toml"))
}

fn load_config(path: Option<&Path>) -> Result<ReportConfig, CliError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path().filter(|p| p.is_file()) {
            Some(p) => p,
            None => return Ok(ReportConfig::default()),
        },
    };
    tracing::debug!(path = %path.display(), "loading config");
    Ok(ReportConfig::load(&path)?)
}

fn load_source(source: &SourceArgs) -> Result<Loaded, CliError> {
    let mut config = load_config(source.config.as_deref())?;

    if let Some(max_scan) = source.max_scan {
        if max_scan == 0 {
            return Err(CliError::args("--max-scan must be at least 1"));
        }
        config.header.max_scan = max_scan;
    }

    let delimiter = match source.delimiter.or(config.input.delimiter) {
        Some(d) if d.is_ascii() => Some(d as u8),
        Some(d) => {
            return Err(CliError::args(format!(
                "delimiter must be a single ASCII character, got {d:?}"
            )))
        }
        None => None,
    };

    let raw = scorecard_io::read_table_with_delimiter(&source.input, delimiter)?;

    let (header_row, header_source) = match source.header_row {
        Some(row) if row >= raw.len() => {
            return Err(CliError::args(format!(
                "--header-row {row} is past the end of {}",
                source.input.display()
            ))
            .with_hint(format!("the source has {} row(s), numbered from 0", raw.len())));
        }
        Some(row) => (row, HeaderSource::Override),
        None => {
            let found = detect_header(raw.rows(), &config.header);
            let how = if found.matched {
                HeaderSource::Detected
            } else {
                HeaderSource::Fallback
            };
            (found.index, how)
        }
    };

    let table = NormalizedTable::from_raw(&raw, header_row, &config.input.missing_markers);
    tracing::info!(header_row, columns = table.columns().len(), rows = table.len(), "table materialized");

    Ok(Loaded {
        config,
        header_row,
        header_source,
        table,
    })
}

fn write_stdout(bytes: &[u8]) -> Result<(), CliError> {
    let mut out = io::stdout().lock();
    out.write_all(bytes)
        .and_then(|_| out.flush())
        .map_err(|e| CliError::from(ReportError::Io(format!("cannot write to stdout: {e}"))))
}

// ============================================================================
// summarize
// ============================================================================

fn render_report(rows: &[SummaryRow], format: OutputFormat) -> Result<Vec<u8>, CliError> {
    let bytes = match format {
        OutputFormat::Csv => scorecard_io::export::to_csv_bytes(rows)?,
        OutputFormat::Json => {
            let mut buf = Vec::new();
            scorecard_io::export::write_summary_json(rows, &mut buf)?;
            buf
        }
        OutputFormat::Table => render_summary_table(rows).into_bytes(),
    };
    Ok(bytes)
}

pub(crate) fn cmd_summarize(args: SummarizeArgs) -> Result<(), CliError> {
    let loaded = load_source(&args.source)?;
    let summary = build_summary(&loaded.table)?;

    if args.stats {
        let stats = SummaryStats::compute(loaded.table.len(), &summary);
        eprintln!("rows (raw):         {}", stats.raw_rows);
        eprintln!("rows (summary):     {}", stats.summary_rows);
        eprintln!("employees (unique): {}", stats.unique_employees);
    }

    let mut rows = summary;
    if let Some(month) = &args.month {
        rows = filter_by_month(&rows, month);
    }
    if let Some(query) = &args.search {
        rows = search(&rows, query);
    }

    let format = args
        .format
        .map(OutputFormat::from)
        .unwrap_or(loaded.config.output.format);
    let bytes = render_report(&rows, format)?;

    let output = args
        .output
        .or_else(|| loaded.config.output.path.as_ref().map(PathBuf::from));

    match output {
        Some(path) if path.as_os_str() != "-" => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| {
                    CliError::from(ReportError::Io(format!("cannot create {}: {e}", parent.display())))
                })?;
            }
            fs::write(&path, &bytes).map_err(|e| {
                CliError::from(ReportError::Io(format!("cannot write {}: {e}", path.display())))
            })?;
            if !args.quiet {
                eprintln!("wrote {} ({} rows)", path.display(), rows.len());
            }
            Ok(())
        }
        _ => write_stdout(&bytes),
    }
}

// ============================================================================
// inspect
// ============================================================================

pub(crate) fn cmd_inspect(source: SourceArgs, preview_rows: usize) -> Result<(), CliError> {
    let loaded = load_source(&source)?;
    let table = &loaded.table;

    let how = match loaded.header_source {
        HeaderSource::Detected => "detected".to_string(),
        HeaderSource::Override => "from --header-row".to_string(),
        HeaderSource::Fallback => format!(
            "fallback: no row among the first {} has {}",
            loaded.config.header.max_scan,
            loaded.config.header.required_labels.join(", ")
        ),
    };

    let missing: Vec<&str> = [MONTH_COLUMN, NAME_COLUMN, SCORE_COLUMN]
        .into_iter()
        .filter(|c| table.column_index(c).is_none())
        .collect();

    let mut out = String::new();
    out.push_str(&format!("source:     {}\n", source.input.display()));
    out.push_str(&format!("header row: {} ({how})\n", loaded.header_row));
    out.push_str(&format!("columns:    {}\n", table.columns().join(", ")));
    if !missing.is_empty() {
        out.push_str(&format!("missing:    {}\n", missing.join(", ")));
    }
    out.push_str(&format!("data rows:  {}\n\n", table.len()));

    let preview: Vec<Vec<String>> = (0..table.len().min(preview_rows))
        .map(|row| {
            (0..table.columns().len())
                .map(|col| table.cell(row, col).display())
                .collect()
        })
        .collect();
    out.push_str(&render_grid(table.columns(), &preview));

    write_stdout(out.as_bytes())
}

// ============================================================================
// months
// ============================================================================

pub(crate) fn cmd_months(source: SourceArgs) -> Result<(), CliError> {
    let loaded = load_source(&source)?;
    let summary = build_summary(&loaded.table)?;

    let mut out = String::new();
    for month in distinct_months(&summary) {
        out.push_str(&month);
        out.push('\n');
    }
    write_stdout(out.as_bytes())
}
