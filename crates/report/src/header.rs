use std::collections::HashSet;

use crate::config::HeaderOptions;
use crate::model::Cell;

/// Outcome of a header scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderDetection {
    pub index: usize,
    /// False when `index` is the configured fallback rather than a match.
    pub matched: bool,
}

/// Find the first row among the leading `max_scan` rows whose cell values
/// (trimmed, lower-cased) contain every required label.
pub fn detect_header(rows: &[Vec<Cell>], options: &HeaderOptions) -> HeaderDetection {
    let required: Vec<String> = options
        .required_labels
        .iter()
        .map(|l| l.trim().to_lowercase())
        .collect();

    for (index, row) in rows.iter().take(options.max_scan).enumerate() {
        let labels: HashSet<String> = row
            .iter()
            .map(|cell| cell.display().trim().to_lowercase())
            .collect();

        if required.iter().all(|l| labels.contains(l)) {
            tracing::debug!(index, "header row located");
            return HeaderDetection { index, matched: true };
        }
    }

    tracing::warn!(
        scanned = rows.len().min(options.max_scan),
        fallback = options.fallback_row,
        "no header row found, using fallback"
    );
    HeaderDetection {
        index: options.fallback_row,
        matched: false,
    }
}

pub fn locate_header(rows: &[Vec<Cell>], options: &HeaderOptions) -> usize {
    detect_header(rows, options).index
}
