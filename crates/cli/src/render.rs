// Plain-text table rendering for terminal output

use unicode_width::UnicodeWidthStr;

use scorecard_report::SummaryRow;

/// Widest a single column may render before truncation.
const MAX_COL_WIDTH: usize = 40;

/// Display width of a string, accounting for CJK double-width, emoji, etc.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `width` display columns, adding ".." if truncated.
/// Uses Unicode display width so CJK/emoji alignment stays correct.
pub(crate) fn truncate_display(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    if width < 3 {
        return s
            .chars()
            .next()
            .filter(|ch| unicode_width::UnicodeWidthChar::width(*ch).unwrap_or(0) <= width)
            .map(String::from)
            .unwrap_or_default();
    }

    // Walk chars, accumulating display width, stop at width - 2 to leave room for ".."
    let budget = width - 2;
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        out.push(ch);
    }
    out.push_str("..");
    out
}

/// Pad or truncate a string to exactly `width` display columns.
pub(crate) fn pad_right(s: &str, width: usize) -> String {
    let cell = truncate_display(s, width);
    let pad = width.saturating_sub(display_width(&cell));
    format!("{cell}{}", " ".repeat(pad))
}

/// Render a header + rows grid with aligned columns and a rule under the header.
pub(crate) fn render_grid(headers: &[String], rows: &[Vec<String>]) -> String {
    let cols = rows.iter().map(Vec::len).chain([headers.len()]).max().unwrap_or(0);
    let mut widths = vec![0usize; cols];
    for line in std::iter::once(headers).chain(rows.iter().map(Vec::as_slice)) {
        for (i, value) in line.iter().enumerate() {
            widths[i] = widths[i].max(display_width(value).min(MAX_COL_WIDTH));
        }
    }

    let format_line = |line: &[String]| {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| pad_right(line.get(i).map(String::as_str).unwrap_or(""), w))
            .collect();
        cells.join("  ").trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&format_line(headers));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in rows {
        out.push_str(&format_line(row));
        out.push('\n');
    }
    out
}

pub(crate) fn render_summary_table(rows: &[SummaryRow]) -> String {
    let headers: Vec<String> = ["Month", "EmployeeID", "Name", "Average Score"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|r| {
            vec![
                r.month.clone().unwrap_or_default(),
                r.employee_id.clone(),
                r.name.clone(),
                format!("{:.2}", r.average_score),
            ]
        })
        .collect();
    render_grid(&headers, &body)
}
