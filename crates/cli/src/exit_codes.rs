//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 1    | Reserved (unexpected failure)                    |
//! | 2    | CLI usage error (bad args)                       |
//! | 3    | Source file unreadable (format, corrupt, missing)|
//! | 4    | Required columns missing after header resolution |
//! | 5    | Config file unreadable or invalid                |
//! | 6    | Output could not be written                      |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into [`report_exit_code`] or the relevant command

use scorecard_report::ReportError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, out-of-range options.
pub const EXIT_USAGE: u8 = 2;

/// The review export could not be read into a table.
pub const EXIT_SOURCE: u8 = 3;

/// Month, Name or Score column missing.
pub const EXIT_SCHEMA: u8 = 4;

/// Config file missing, malformed, or failing validation.
pub const EXIT_CONFIG: u8 = 5;

/// Report could not be written to stdout or the output path.
pub const EXIT_OUTPUT: u8 = 6;

/// Map an engine error to its exit code.
pub fn report_exit_code(err: &ReportError) -> u8 {
    match err {
        ReportError::SourceRead(_) => EXIT_SOURCE,
        ReportError::Schema { .. } => EXIT_SCHEMA,
        ReportError::ConfigParse(_) | ReportError::ConfigValidation(_) => EXIT_CONFIG,
        ReportError::Io(_) => EXIT_OUTPUT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_USAGE,
            EXIT_SOURCE,
            EXIT_SCHEMA,
            EXIT_CONFIG,
            EXIT_OUTPUT,
        ];
        let mut sorted = codes.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), codes.len());
    }

    #[test]
    fn engine_errors_map_to_codes() {
        let schema = ReportError::Schema { missing: vec!["Score".into()], found: vec![] };
        assert_eq!(report_exit_code(&schema), EXIT_SCHEMA);
        assert_eq!(report_exit_code(&ReportError::SourceRead("x".into())), EXIT_SOURCE);
        assert_eq!(report_exit_code(&ReportError::ConfigValidation("x".into())), EXIT_CONFIG);
        assert_eq!(report_exit_code(&ReportError::Io("x".into())), EXIT_OUTPUT);
    }
}
