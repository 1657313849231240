//! NAV time-series model.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One persisted NAV observation, keyed by (date, portfolio_name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavRecord {
    pub date: NaiveDate,
    pub portfolio_name: String,
    pub nav: f64,
}

/// A pivoted view of the NAV store: one ascending date index and one
/// column per portfolio, `None` where a portfolio has no value on a date.
#[derive(Debug, Clone, Default)]
pub struct NavCurveSet {
    /// Ascending trading-day index.
    pub dates: Vec<NaiveDate>,
    /// Portfolio name -> NAV per date, aligned to `dates`.
    pub series: BTreeMap<String, Vec<Option<f64>>>,
}

impl NavCurveSet {
    /// True when the store held no rows at or after the requested floor.
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Pivots a flat row set. Duplicate (date, portfolio) pairs collapse to
    /// the last value seen, mirroring the store's replace-on-conflict key.
    pub fn from_records(records: &[NavRecord]) -> Self {
        let mut dates: Vec<NaiveDate> = records.iter().map(|r| r.date).collect();
        dates.sort();
        dates.dedup();

        let index: BTreeMap<NaiveDate, usize> =
            dates.iter().enumerate().map(|(i, d)| (*d, i)).collect();

        let mut series: BTreeMap<String, Vec<Option<f64>>> = BTreeMap::new();
        for record in records {
            let column = series
                .entry(record.portfolio_name.clone())
                .or_insert_with(|| vec![None; dates.len()]);
            column[index[&record.date]] = Some(record.nav);
        }

        Self { dates, series }
    }

    /// One portfolio's dense curve: (date, nav) for every populated cell.
    pub fn curve(&self, portfolio_name: &str) -> Vec<(NaiveDate, f64)> {
        match self.series.get(portfolio_name) {
            Some(column) => self
                .dates
                .iter()
                .zip(column.iter())
                .filter_map(|(date, nav)| nav.map(|v| (*date, v)))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Daily simple returns per portfolio, computed over consecutive
    /// populated cells. The curve's first point carries no return, so the
    /// result is indexed on `dates[1..]`.
    pub fn daily_returns(&self) -> BTreeMap<String, BTreeMap<NaiveDate, f64>> {
        let mut returns = BTreeMap::new();
        for name in self.series.keys() {
            let curve = self.curve(name);
            let mut per_date = BTreeMap::new();
            for pair in curve.windows(2) {
                let (_, prev) = pair[0];
                let (date, current) = pair[1];
                if prev != 0.0 {
                    let change = current / prev - 1.0;
                    if change.is_finite() {
                        per_date.insert(date, change);
                    }
                }
            }
            returns.insert(name.clone(), per_date);
        }
        returns
    }
}
