use std::collections::HashMap;

use crate::model::{Cell, RawTable};

/// A table with a resolved header row.
///
/// Column names are trimmed with internal whitespace collapsed. Blank header
/// cells become `Unnamed: {index}` and repeated names get a `.{n}` suffix, so
/// name lookup always resolves to the first occurrence of a label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl NormalizedTable {
    /// Build a table from already-typed rows; `columns` are normalized.
    pub fn new<S: AsRef<str>>(columns: &[S], rows: Vec<Vec<Cell>>) -> Self {
        let header: Vec<Cell> = columns.iter().map(|c| Cell::text(c.as_ref())).collect();
        let width = rows.iter().map(Vec::len).max().unwrap_or(0).max(header.len());
        Self {
            columns: resolve_column_names(&header, width),
            rows,
        }
    }

    /// Promote `header_row` of `raw` to the header; rows below it become data.
    ///
    /// Text cells matching one of `missing_markers` (after trimming) become
    /// [`Cell::Empty`]. A header row past the end of the table yields a table
    /// with no columns.
    pub fn from_raw(raw: &RawTable, header_row: usize, missing_markers: &[String]) -> Self {
        let Some(header) = raw.rows().get(header_row) else {
            return Self::default();
        };

        let data = &raw.rows()[header_row + 1..];
        let width = data.iter().map(Vec::len).max().unwrap_or(0).max(header.len());

        let rows = data
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Cell::Text(s) if is_marker(s, missing_markers) => Cell::Empty,
                        other => other.clone(),
                    })
                    .collect()
            })
            .collect();

        Self {
            columns: resolve_column_names(header, width),
            rows,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (`row`, `col`); ragged rows read as empty past their end.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        const EMPTY: &Cell = &Cell::Empty;
        self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(EMPTY)
    }
}

fn is_marker(s: &str, markers: &[String]) -> bool {
    let trimmed = s.trim();
    trimmed.is_empty() || markers.iter().any(|m| m == trimmed)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn resolve_column_names(header: &[Cell], width: usize) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(width);

    for idx in 0..width {
        let base = header
            .get(idx)
            .map(|cell| collapse_whitespace(&cell.display()))
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| format!("Unnamed: {idx}"));

        let count = seen.entry(base.clone()).or_insert(0);
        let name = if *count == 0 {
            base
        } else {
            format!("{base}.{count}")
        };
        *count += 1;
        names.push(name);
    }

    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers() -> Vec<String> {
        crate::config::DEFAULT_MISSING_MARKERS
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn text_row(values: &[&str]) -> Vec<Cell> {
        values.iter().map(|v| Cell::text(*v)).collect()
    }

    #[test]
    fn promotes_header_row() {
        let raw = RawTable::new(vec![
            text_row(&["Quarterly review"]),
            text_row(&["Month", "Name", "Score"]),
            text_row(&["Jan", "Alice", "80"]),
        ]);
        let table = NormalizedTable::from_raw(&raw, 1, &markers());
        assert_eq!(table.columns(), &["Month", "Name", "Score"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell(0, 1), &Cell::text("Alice"));
    }

    #[test]
    fn column_names_are_collapsed() {
        let table = NormalizedTable::new(&["  Month ", "Employee \n  Name", "Score\t"], vec![]);
        assert_eq!(table.columns(), &["Month", "Employee Name", "Score"]);
    }

    #[test]
    fn blank_and_duplicate_header_cells() {
        let raw = RawTable::new(vec![
            vec![Cell::text("Score"), Cell::Empty, Cell::text("Score")],
            text_row(&["1", "2", "3", "4"]),
        ]);
        let table = NormalizedTable::from_raw(&raw, 0, &markers());
        assert_eq!(table.columns(), &["Score", "Unnamed: 1", "Score.1", "Unnamed: 3"]);
        assert_eq!(table.column_index("Score"), Some(0));
    }

    #[test]
    fn numeric_header_cells_render_as_text() {
        let raw = RawTable::new(vec![vec![Cell::Number(2024.0), Cell::text("Name")]]);
        let table = NormalizedTable::from_raw(&raw, 0, &markers());
        assert_eq!(table.columns(), &["2024", "Name"]);
    }

    #[test]
    fn missing_markers_become_empty() {
        let raw = RawTable::new(vec![
            text_row(&["Month", "Name", "Score"]),
            text_row(&["Jan", " n/a ", "NaN"]),
            text_row(&["  ", "Bob", "70"]),
        ]);
        let table = NormalizedTable::from_raw(&raw, 0, &markers());
        assert_eq!(table.cell(0, 1), &Cell::Empty);
        assert_eq!(table.cell(0, 2), &Cell::Empty);
        assert_eq!(table.cell(1, 0), &Cell::Empty);
        assert_eq!(table.cell(1, 1), &Cell::text("Bob"));
    }

    #[test]
    fn ragged_rows_read_as_empty() {
        let raw = RawTable::new(vec![text_row(&["Month", "Name", "Score"]), text_row(&["Jan"])]);
        let table = NormalizedTable::from_raw(&raw, 0, &markers());
        assert_eq!(table.cell(0, 2), &Cell::Empty);
        assert_eq!(table.cell(5, 0), &Cell::Empty);
    }

    #[test]
    fn header_row_past_end() {
        let raw = RawTable::new(vec![text_row(&["Month"])]);
        let table = NormalizedTable::from_raw(&raw, 4, &markers());
        assert!(table.columns().is_empty());
        assert!(table.is_empty());
    }
}
