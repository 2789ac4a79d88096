// Property-based tests for header detection and aggregation.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use scorecard_report::summary::{aggregate, forward_fill};
use scorecard_report::{build_summary, locate_header, Cell, EmployeeRecord, HeaderOptions, NormalizedTable};

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn arb_month() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        1 => Just(None),
        3 => prop::sample::select(vec!["Jan", "Feb", "Mar"]).prop_map(|m| Some(m.to_string())),
    ]
}

fn arb_record() -> impl Strategy<Value = EmployeeRecord> {
    (
        arb_month(),
        prop::sample::select(vec!["", "PPS010", "PPS020"]),
        prop::sample::select(vec!["Alice", "Bob", ""]),
        // Mixed magnitudes so float summation order would matter.
        prop_oneof![0.0..100.0f64, 1e12..1e13f64, Just(0.1)],
    )
        .prop_map(|(month, id, name, score)| EmployeeRecord {
            month,
            employee_id: id.to_string(),
            name: name.to_string(),
            score,
        })
}

/// Filler cells that can never spell a header label.
fn arb_filler_cell() -> impl Strategy<Value = Cell> {
    prop_oneof![
        Just(Cell::Empty),
        (0.0..1000.0f64).prop_map(Cell::Number),
        "[a-z]{1,3}[0-9]".prop_map(Cell::Text),
    ]
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config())]

    #[test]
    fn aggregation_is_order_independent(
        (records, shuffled) in prop::collection::vec(arb_record(), 0..40)
            .prop_flat_map(|records| {
                let shuffled = Just(records.clone()).prop_shuffle();
                (Just(records), shuffled)
            })
    ) {
        prop_assert_eq!(aggregate(&records), aggregate(&shuffled));
    }

    #[test]
    fn aggregation_output_is_sorted_and_unique(
        records in prop::collection::vec(arb_record(), 0..40)
    ) {
        let rows = aggregate(&records);
        for pair in rows.windows(2) {
            let key = |r: &scorecard_report::SummaryRow| {
                (r.month.is_none(), r.month.clone(), r.employee_id.clone(), r.name.clone())
            };
            prop_assert!(key(&pair[0]) < key(&pair[1]));
        }
    }

    #[test]
    fn forward_fill_is_idempotent(values in prop::collection::vec(arb_month(), 0..30)) {
        let once = forward_fill(&values);
        let twice = forward_fill(&once);
        prop_assert_eq!(&once, &twice);

        // Only a leading run may stay missing.
        let first_present = values.iter().position(Option::is_some).unwrap_or(values.len());
        prop_assert!(once[first_present..].iter().all(Option::is_some));
        prop_assert!(once[..first_present].iter().all(Option::is_none));
    }

    #[test]
    fn header_found_at_first_qualifying_row(
        filler in prop::collection::vec(prop::collection::vec(arb_filler_cell(), 0..5), 0..20),
        max_scan in 1usize..30,
        fallback in 0usize..5,
    ) {
        let header_at = filler.len();
        let mut rows = filler;
        rows.push(vec![Cell::text("Score"), Cell::text("MONTH"), Cell::text(" name ")]);
        rows.push(vec![Cell::text("month"), Cell::text("name"), Cell::text("score")]);

        let options = HeaderOptions { max_scan, fallback_row: fallback, ..HeaderOptions::default() };
        let expected = if header_at < max_scan { header_at } else { fallback };
        prop_assert_eq!(locate_header(&rows, &options), expected);
    }

    #[test]
    fn summary_rows_match_pipeline_records(
        rows in prop::collection::vec(
            (arb_month(), prop::sample::select(vec!["PPS1 - Ann", "Ben", "pps2 – Cy"]), 0.0..100.0f64),
            1..30,
        )
    ) {
        let cells = rows
            .iter()
            .map(|(m, n, s)| vec![Cell::from(m.as_deref()), Cell::text(*n), Cell::Number(*s)])
            .collect();
        let table = NormalizedTable::new(&["Month", "Name", "Score"], cells);
        let summary = build_summary(&table).unwrap();

        // Every named row lands in exactly one group.
        prop_assert!(!summary.is_empty());
        prop_assert!(summary.len() <= rows.len());
        for row in &summary {
            prop_assert!(row.average_score >= 0.0 && row.average_score <= 100.0);
        }
    }
}
