use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ReportError {
    /// The source file could not be opened or parsed into a table.
    SourceRead(String),
    /// Required columns absent after header resolution.
    Schema { missing: Vec<String>, found: Vec<String> },
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad scan bound, blank label, etc.).
    ConfigValidation(String),
    /// IO error writing output.
    Io(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceRead(msg) => write!(f, "cannot read source: {msg}"),
            Self::Schema { missing, found } => {
                let found = if found.is_empty() {
                    "none".to_string()
                } else {
                    found.join(", ")
                };
                write!(
                    f,
                    "missing required column(s): {} (found: {found})",
                    missing.join(", ")
                )
            }
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReportError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_message_lists_missing_and_found() {
        let err = ReportError::Schema {
            missing: vec!["Score".into()],
            found: vec!["Month".into(), "Name".into()],
        };
        assert_eq!(
            err.to_string(),
            "missing required column(s): Score (found: Month, Name)"
        );
    }

    #[test]
    fn schema_message_with_no_columns() {
        let err = ReportError::Schema {
            missing: vec!["Month".into(), "Name".into(), "Score".into()],
            found: vec![],
        };
        assert!(err.to_string().ends_with("(found: none)"));
    }
}
