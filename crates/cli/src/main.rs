// Scorecard CLI - monthly performance review summaries from spreadsheet exports

mod commands;
mod exit_codes;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use exit_codes::{report_exit_code, EXIT_SUCCESS, EXIT_USAGE};
use scorecard_report::config::OutputFormat;
use scorecard_report::ReportError;

#[derive(Parser)]
#[command(name = "scorecard")]
#[command(about = "Monthly average scores per employee from a performance review export")]
#[command(version)]
struct Cli {
    /// More log output on stderr (-v info, -vv debug). SCORECARD_LOG overrides.
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that reads a review export.
#[derive(Args, Debug, Clone)]
pub(crate) struct SourceArgs {
    /// Review export (.xls, .xlsx, .xlsm, .xlsb, .ods, .csv, .tsv, .txt)
    pub input: PathBuf,

    /// Header row, 0-based. Skips header detection.
    #[arg(long, value_name = "N")]
    pub header_row: Option<usize>,

    /// Rows searched when detecting the header
    #[arg(long, value_name = "N")]
    pub max_scan: Option<usize>,

    /// Field delimiter for delimited text (sniffed when omitted)
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Config file (default: <config dir>/scorecard/config.toml when present)
    #[arg(long, env = "SCORECARD_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the monthly per-employee average score report
    #[command(after_help = "\
Examples:
  scorecard summarize review.xls
  scorecard summarize review.xls -o out/scores.csv
  scorecard summarize review.xlsx --header-row 1 --format table
  scorecard summarize review.csv --month Jan --search pps010
  scorecard summarize review.xls --format json --stats")]
    Summarize {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format (default: csv, or [output].format from config)
        #[arg(long, short = 'f')]
        format: Option<FormatArg>,

        /// Write the report to a file instead of stdout (- for stdout)
        #[arg(long, short = 'o', value_name = "PATH")]
        output: Option<PathBuf>,

        /// Keep only rows of this month
        #[arg(long)]
        month: Option<String>,

        /// Keep rows whose Name or EmployeeID contains TEXT (case-insensitive)
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,

        /// Print row and employee counts to stderr
        #[arg(long)]
        stats: bool,

        /// Suppress stderr notes
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Show the detected header row, resolved columns, and a preview of the data
    #[command(after_help = "\
Examples:
  scorecard inspect review.xls
  scorecard inspect review.xls --rows 10 --header-row 2")]
    Inspect {
        #[command(flatten)]
        source: SourceArgs,

        /// Number of data rows to preview
        #[arg(long, default_value_t = 30)]
        rows: usize,
    },

    /// List the months present in the report
    Months {
        #[command(flatten)]
        source: SourceArgs,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum FormatArg {
    Csv,
    Json,
    Table,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Table => OutputFormat::Table,
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("SCORECARD_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Summarize {
            source,
            format,
            output,
            month,
            search,
            stats,
            quiet,
        } => commands::cmd_summarize(commands::SummarizeArgs {
            source,
            format,
            output,
            month,
            search,
            stats,
            quiet,
        }),
        Commands::Inspect { source, rows } => commands::cmd_inspect(source, rows),
        Commands::Months { source } => commands::cmd_months(source),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    /// Create error from an engine error with the registered exit code.
    pub fn report(err: ReportError) -> Self {
        let code = report_exit_code(&err);
        let hint = match &err {
            ReportError::Schema { .. } => Some(
                "pick the header row with --header-row N (`scorecard inspect` shows what was detected)"
                    .to_string(),
            ),
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl From<ReportError> for CliError {
    fn from(err: ReportError) -> Self {
        Self::report(err)
    }
}
