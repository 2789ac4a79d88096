//! Post-aggregation views over a finished report.

use crate::model::SummaryRow;

/// Rows whose month equals `month` exactly.
pub fn filter_by_month(rows: &[SummaryRow], month: &str) -> Vec<SummaryRow> {
    rows.iter()
        .filter(|r| r.month.as_deref() == Some(month))
        .cloned()
        .collect()
}

/// Rows whose name or employee id contains `query`, case-insensitively.
/// A blank query matches everything.
pub fn search(rows: &[SummaryRow], query: &str) -> Vec<SummaryRow> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|r| {
            r.name.to_lowercase().contains(&needle)
                || r.employee_id.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Distinct non-null months, sorted.
pub fn distinct_months(rows: &[SummaryRow]) -> Vec<String> {
    let mut months: Vec<String> = rows.iter().filter_map(|r| r.month.clone()).collect();
    months.sort();
    months.dedup();
    months
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(month: Option<&str>, id: &str, name: &str) -> SummaryRow {
        SummaryRow {
            month: month.map(str::to_string),
            employee_id: id.into(),
            name: name.into(),
            average_score: 50.0,
        }
    }

    fn sample() -> Vec<SummaryRow> {
        vec![
            row(Some("Feb"), "PPS010", "Alice"),
            row(Some("Jan"), "PPS010", "Alice"),
            row(Some("Jan"), "PPS020", "Bob"),
            row(None, "", "Carol"),
        ]
    }

    #[test]
    fn month_filter() {
        let jan = filter_by_month(&sample(), "Jan");
        assert_eq!(jan.len(), 2);
        assert!(jan.iter().all(|r| r.month.as_deref() == Some("Jan")));
        assert!(filter_by_month(&sample(), "jan").is_empty());
    }

    #[test]
    fn search_matches_name_or_id() {
        assert_eq!(search(&sample(), "bob").len(), 1);
        assert_eq!(search(&sample(), "pps010").len(), 2);
        assert_eq!(search(&sample(), " CAR ").len(), 1);
        assert_eq!(search(&sample(), "   ").len(), 4);
        assert!(search(&sample(), "zed").is_empty());
    }

    #[test]
    fn months_are_distinct_and_sorted() {
        assert_eq!(distinct_months(&sample()), vec!["Feb", "Jan"]);
    }
}
