//! Property-based tests for the filter, sort and pagination stages.

use horizon_grid::model::{
    CellValue, DynamicRecord, PageState, Record, RecordId, SortState, apply_filter,
    apply_pagination, apply_sort, compare_values, page_count,
};
use proptest::prelude::*;
use std::cmp::Ordering;

fn records(names: Vec<String>, values: Vec<i64>) -> Vec<DynamicRecord> {
    names
        .into_iter()
        .zip(values)
        .enumerate()
        .map(|(i, (name, v))| DynamicRecord::new(i as i64).with("name", name).with("v", v))
        .collect()
}

fn index_of(record: &DynamicRecord) -> i64 {
    match record.id() {
        RecordId::Int(n) => n,
        RecordId::Str(_) => unreachable!("records are built with integer ids"),
    }
}

fn v_of(record: &DynamicRecord) -> i64 {
    record.field("v").and_then(|v| v.as_int()).unwrap_or_default()
}

proptest! {
    /// An empty or blank query keeps every record in input order.
    #[test]
    fn filter_blank_query_is_identity(
        names in prop::collection::vec("[a-zA-Z ]{0,8}", 0..40),
        blank in "[ \t]{0,3}",
    ) {
        let values = vec![0; names.len()];
        let rows = records(names, values);
        let hits: Vec<DynamicRecord> = apply_filter(&rows, &blank).into_iter().cloned().collect();
        prop_assert_eq!(hits, rows);
    }

    /// Filtering returns an ordered subsequence of matching records.
    #[test]
    fn filter_returns_matching_subsequence(
        names in prop::collection::vec("[a-cA-C]{0,6}", 0..40),
        query in "[a-cA-C]{1,2}",
    ) {
        let values = vec![0; names.len()];
        let rows = records(names, values);
        let hits = apply_filter(&rows, &query);
        let needle = query.to_lowercase();

        let positions: Vec<i64> = hits.iter().map(|r| index_of(r)).collect();
        prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        for row in &rows {
            let matched = row.field("name").unwrap().to_string().to_lowercase().contains(&needle);
            prop_assert_eq!(matched, positions.contains(&index_of(row)));
        }
    }

    /// Sorting orders by key and keeps ties in input order in both directions.
    #[test]
    fn sort_is_stable_in_both_directions(values in prop::collection::vec(0i64..5, 0..60)) {
        let names = vec![String::new(); values.len()];
        let rows = records(names, values);

        for sort in [SortState::ascending("v"), SortState::descending("v")] {
            let sorted = apply_sort(rows.iter().collect(), Some(&sort), &[]);
            prop_assert_eq!(sorted.len(), rows.len());
            for pair in sorted.windows(2) {
                let ord = v_of(pair[0]).cmp(&v_of(pair[1]));
                prop_assert_ne!(sort.order.apply(ord), Ordering::Greater);
                if ord == Ordering::Equal {
                    prop_assert!(index_of(pair[0]) < index_of(pair[1]));
                }
            }
        }
    }

    /// Every page is in range and the pages partition the input.
    #[test]
    fn pagination_pages_partition_input(
        total in 0usize..200,
        per_page in 1usize..30,
        requested in 0usize..50,
    ) {
        let rows: Vec<usize> = (0..total).collect();
        let pages = page_count(total, per_page);

        let slice = apply_pagination(rows.clone(), &PageState::new(requested, per_page));
        prop_assert!(slice.current_page >= 1 && slice.current_page <= pages);
        prop_assert!(slice.rows.len() <= per_page);
        prop_assert_eq!(slice.rows.is_empty(), total == 0);

        let joined: Vec<usize> = (1..=pages)
            .flat_map(|page| apply_pagination(rows.clone(), &PageState::new(page, per_page)).rows)
            .collect();
        prop_assert_eq!(joined, rows);
    }

    /// The value comparison is antisymmetric across mixed types.
    #[test]
    fn compare_values_is_antisymmetric(a in value_strategy(), b in value_strategy()) {
        prop_assert_eq!(compare_values(&a, &b), compare_values(&b, &a).reverse());
    }

    /// The value comparison is transitive, including integers beyond the
    /// exact range of `f64` mixed with floats.
    #[test]
    fn compare_values_is_transitive(
        a in value_strategy(),
        b in value_strategy(),
        c in value_strategy(),
    ) {
        let mut values = [a, b, c];
        values.sort_by(compare_values);
        let [x, y, z] = &values;
        prop_assert_ne!(compare_values(x, y), Ordering::Greater);
        prop_assert_ne!(compare_values(y, z), Ordering::Greater);
        prop_assert_ne!(compare_values(x, z), Ordering::Greater);
        if compare_values(x, y) == Ordering::Equal && compare_values(y, z) == Ordering::Equal {
            prop_assert_eq!(compare_values(x, z), Ordering::Equal);
        }
    }
}

/// Integers straddling 2^53, where `i64 as f64` starts rounding.
const BIG: i64 = 1 << 53;

fn value_strategy() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        Just(CellValue::None),
        any::<bool>().prop_map(CellValue::Bool),
        (-100i64..100).prop_map(CellValue::Int),
        (-100.0f64..100.0).prop_map(CellValue::Float),
        (BIG - 4..BIG + 4).prop_map(CellValue::Int),
        (BIG - 4..BIG + 4).prop_map(|n| CellValue::Float(n as f64)),
        Just(CellValue::Float(-0.0)),
        Just(CellValue::Int(0)),
        "[a-zA-Z]{0,4}".prop_map(CellValue::Str),
        prop::collection::vec((-5i64..5).prop_map(CellValue::Int), 0..3).prop_map(CellValue::List),
    ]
}
