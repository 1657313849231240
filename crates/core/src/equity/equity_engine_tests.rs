use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::{compute_equity_curves, to_nav_records};
use crate::constants::INITIAL_CAPITAL;
use crate::errors::{CurveError, Error};
use crate::portfolios::Portfolio;
use crate::returns::ReturnTable;

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn table_of(dates: &[&str], columns: &[(&str, &[f64])]) -> ReturnTable {
    ReturnTable {
        dates: dates.iter().map(|s| d(s)).collect(),
        columns: columns
            .iter()
            .map(|(symbol, returns)| ((*symbol).to_string(), returns.to_vec()))
            .collect(),
    }
}

#[test]
fn curve_starts_at_initial_capital() {
    let catalog = vec![Portfolio::new("A", &[("SPY", 1.0)])];
    let table = table_of(
        &["2026-02-02", "2026-02-03"],
        &[("SPY", &[0.0, 0.02])],
    );

    let curves = compute_equity_curves(&table, &catalog).unwrap();
    let curve = &curves["A"];
    assert_eq!(curve[0], INITIAL_CAPITAL);
    assert!((curve[1] - 102.0).abs() < 1e-9);
}

#[test]
fn nav_follows_the_blended_return_recurrence() {
    let catalog = vec![Portfolio::new(
        "Blend",
        &[("SPY", 0.6), ("GLD", 0.4)],
    )];
    let table = table_of(
        &["2026-02-02", "2026-02-03", "2026-02-04"],
        &[("SPY", &[0.0, 0.01, -0.02]), ("GLD", &[0.0, 0.005, 0.01])],
    );

    let curves = compute_equity_curves(&table, &catalog).unwrap();
    let curve = &curves["Blend"];

    let mut expected = INITIAL_CAPITAL;
    for t in 0..table.dates.len() {
        let blended = 0.6 * table.columns["SPY"][t] + 0.4 * table.columns["GLD"][t];
        expected *= 1.0 + blended;
        assert!(
            (curve[t] - expected).abs() < 1e-9,
            "day {}: {} vs {}",
            t,
            curve[t],
            expected
        );
    }
}

#[test]
fn missing_symbol_weight_is_not_renormalized() {
    // 50% SPY, 50% in a symbol with no data. The missing half must earn
    // exactly zero, so NAV moves at half the SPY return.
    let catalog = vec![Portfolio::new(
        "Half",
        &[("SPY", 0.5), ("MISSING", 0.5)],
    )];
    let table = table_of(
        &["2026-02-02", "2026-02-03"],
        &[("SPY", &[0.0, 0.04])],
    );

    let curves = compute_equity_curves(&table, &catalog).unwrap();
    assert!((curves["Half"][1] - 102.0).abs() < 1e-9);
}

#[test]
fn cash_and_zero_weights_contribute_nothing() {
    let catalog = vec![Portfolio::new(
        "Cashy",
        &[("SPY", 0.5), ("CASH", 0.5), ("GLD", 0.0)],
    )];
    let table = table_of(
        &["2026-02-02", "2026-02-03"],
        &[("SPY", &[0.0, 0.02]), ("GLD", &[0.0, 1.0])],
    );

    let curves = compute_equity_curves(&table, &catalog).unwrap();
    assert!((curves["Cashy"][1] - 101.0).abs() < 1e-9);
}

#[test]
fn empty_date_index_is_a_no_curves_error() {
    let catalog = vec![Portfolio::new("A", &[("SPY", 1.0)])];
    let table = ReturnTable {
        dates: vec![],
        columns: BTreeMap::new(),
    };

    match compute_equity_curves(&table, &catalog) {
        Err(Error::Curve(CurveError::NoCurves)) => {}
        other => panic!("expected NoCurves, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn records_cover_every_date_portfolio_pair() {
    let catalog = vec![
        Portfolio::new("A", &[("SPY", 1.0)]),
        Portfolio::new("B", &[("SPY", 0.5)]),
    ];
    let table = table_of(
        &["2026-02-02", "2026-02-03"],
        &[("SPY", &[0.0, 0.01])],
    );

    let curves = compute_equity_curves(&table, &catalog).unwrap();
    let records = to_nav_records(&table, &curves);
    assert_eq!(records.len(), 4);
    assert!(records
        .iter()
        .any(|r| r.portfolio_name == "A" && r.date == d("2026-02-03")));
}
