use std::path::Path;

use serde::Deserialize;

use crate::error::ReportError;

/// Cell texts treated as "no value" when a table is materialized.
pub const DEFAULT_MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#NA", "N/A", "n/a", "NA", "<NA>", "NULL", "null", "NaN", "nan", "None",
];

pub const DEFAULT_REQUIRED_LABELS: &[&str] = &["month", "name", "score"];

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub header: HeaderOptions,
    pub input: InputConfig,
    pub output: OutputConfig,
}

// ---------------------------------------------------------------------------
// Header detection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeaderOptions {
    /// Number of leading rows searched for the header.
    pub max_scan: usize,
    /// Row used when no scanned row carries every required label.
    pub fallback_row: usize,
    /// Labels that must all appear in the header row (compared trimmed, lower-cased).
    pub required_labels: Vec<String>,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            max_scan: 50,
            fallback_row: 0,
            required_labels: DEFAULT_REQUIRED_LABELS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Input + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    pub missing_markers: Vec<String>,
    /// Field delimiter for delimited text; sniffed when absent.
    pub delimiter: Option<char>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            missing_markers: DEFAULT_MISSING_MARKERS.iter().map(|s| s.to_string()).collect(),
            delimiter: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
    Table,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
            Self::Table => write!(f, "table"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReportConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReportError> {
        let config: ReportConfig =
            toml::from_str(input).map_err(|e| ReportError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ReportError> {
        let input = std::fs::read_to_string(path).map_err(|e| {
            ReportError::ConfigParse(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_toml(&input)
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        if self.header.max_scan == 0 {
            return Err(ReportError::ConfigValidation(
                "header.max_scan must be at least 1".into(),
            ));
        }

        if self.header.required_labels.is_empty() {
            return Err(ReportError::ConfigValidation(
                "header.required_labels must not be empty".into(),
            ));
        }

        if self.header.required_labels.iter().any(|l| l.trim().is_empty()) {
            return Err(ReportError::ConfigValidation(
                "header.required_labels must not contain blank labels".into(),
            ));
        }

        if let Some(d) = self.input.delimiter {
            if !d.is_ascii() {
                return Err(ReportError::ConfigValidation(format!(
                    "input.delimiter must be a single ASCII character, got {d:?}"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
