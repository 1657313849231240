//! Data model for raw price history.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// A raw multi-symbol price table: symbol -> date -> adjusted close.
///
/// Dates within a symbol are strictly increasing (BTreeMap keys) and
/// duplicate dates collapse to the last value seen. The table only ever
/// contains symbols the provider actually returned data for.
#[derive(Debug, Clone, Default)]
pub struct PriceHistory {
    series: BTreeMap<String, BTreeMap<NaiveDate, f64>>,
}

impl PriceHistory {
    /// Creates an empty price history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one (symbol, date, close) observation.
    pub fn insert(&mut self, symbol: &str, date: NaiveDate, close: f64) {
        self.series
            .entry(symbol.to_string())
            .or_default()
            .insert(date, close);
    }

    /// Inserts a whole series for one symbol, replacing any prior data.
    /// Empty series are dropped rather than stored as empty columns.
    pub fn insert_series(&mut self, symbol: &str, points: BTreeMap<NaiveDate, f64>) {
        if !points.is_empty() {
            self.series.insert(symbol.to_string(), points);
        }
    }

    /// The close series for one symbol, if the provider returned it.
    pub fn series(&self, symbol: &str) -> Option<&BTreeMap<NaiveDate, f64>> {
        self.series.get(symbol)
    }

    /// All symbols present in the table.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    /// True when no symbol returned any data.
    pub fn is_empty(&self) -> bool {
        self.series.values().all(BTreeMap::is_empty)
    }

    /// Number of symbols with data.
    pub fn len(&self) -> usize {
        self.series.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn duplicate_dates_collapse_to_last_value() {
        let mut history = PriceHistory::new();
        history.insert("SPY", d("2026-02-02"), 100.0);
        history.insert("SPY", d("2026-02-02"), 101.0);

        let series = history.series("SPY").unwrap();
        assert_eq!(series.len(), 1);
        assert_eq!(series[&d("2026-02-02")], 101.0);
    }

    #[test]
    fn empty_series_are_not_stored() {
        let mut history = PriceHistory::new();
        history.insert_series("GLD", BTreeMap::new());
        assert!(history.is_empty());
        assert!(history.series("GLD").is_none());
    }
}
