use chrono::NaiveDate;

use super::{NavCurveSet, NavRecord};

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn record(date: &str, name: &str, nav: f64) -> NavRecord {
    NavRecord {
        date: d(date),
        portfolio_name: name.to_string(),
        nav,
    }
}

#[test]
fn pivot_aligns_rows_on_a_shared_ascending_index() {
    let records = vec![
        record("2026-02-03", "B", 101.0),
        record("2026-02-02", "A", 100.0),
        record("2026-02-03", "A", 102.0),
    ];

    let set = NavCurveSet::from_records(&records);
    assert_eq!(set.dates, vec![d("2026-02-02"), d("2026-02-03")]);
    assert_eq!(set.series["A"], vec![Some(100.0), Some(102.0)]);
    assert_eq!(set.series["B"], vec![None, Some(101.0)]);
}

#[test]
fn duplicate_keys_collapse_to_the_last_value() {
    let records = vec![
        record("2026-02-02", "A", 100.0),
        record("2026-02-02", "A", 100.5),
    ];

    let set = NavCurveSet::from_records(&records);
    assert_eq!(set.series["A"], vec![Some(100.5)]);
}

#[test]
fn curve_skips_unpopulated_cells() {
    let records = vec![
        record("2026-02-02", "A", 100.0),
        record("2026-02-04", "A", 104.0),
        record("2026-02-03", "B", 50.0),
    ];

    let set = NavCurveSet::from_records(&records);
    let curve = set.curve("A");
    assert_eq!(curve, vec![(d("2026-02-02"), 100.0), (d("2026-02-04"), 104.0)]);
    assert!(set.curve("missing").is_empty());
}

#[test]
fn daily_returns_drop_the_first_point() {
    let records = vec![
        record("2026-02-02", "A", 100.0),
        record("2026-02-03", "A", 102.0),
        record("2026-02-04", "A", 96.9),
    ];

    let set = NavCurveSet::from_records(&records);
    let returns = &set.daily_returns()["A"];
    assert_eq!(returns.len(), 2);
    assert!((returns[&d("2026-02-03")] - 0.02).abs() < 1e-12);
    assert!((returns[&d("2026-02-04")] - (-0.05)).abs() < 1e-12);
    assert!(!returns.contains_key(&d("2026-02-02")));
}

#[test]
fn empty_store_pivots_to_an_explicitly_empty_set() {
    let set = NavCurveSet::from_records(&[]);
    assert!(set.is_empty());
    assert!(set.series.is_empty());
}
