//! Portfolio catalog model.

use serde::Serialize;

use crate::constants::CASH_SYMBOL;

/// One target holding inside a model portfolio.
#[derive(Debug, Clone, Serialize)]
pub struct Holding {
    /// Ticker as declared in the catalog (internal notation, e.g. "BRK.B").
    pub symbol: String,
    /// Target weight as a fraction of capital.
    pub weight: f64,
}

impl Holding {
    /// True for the literal CASH pseudo-symbol.
    pub fn is_cash(&self) -> bool {
        self.symbol.eq_ignore_ascii_case(CASH_SYMBOL)
    }
}

/// An immutable model portfolio: a name and its target weights.
///
/// Weights need not sum to exactly 1.0; any shortfall is implicitly
/// uninvested capital earning zero return. Built once at startup from the
/// hard-coded catalog and never mutated at runtime.
#[derive(Debug, Clone, Serialize)]
pub struct Portfolio {
    /// Unique display name, also the persistence key.
    pub name: String,
    /// Declared holdings in catalog order.
    pub holdings: Vec<Holding>,
}

impl Portfolio {
    /// Builds a portfolio from (symbol, weight) pairs.
    pub fn new(name: &str, weights: &[(&str, f64)]) -> Self {
        Self {
            name: name.to_string(),
            holdings: weights
                .iter()
                .map(|(symbol, weight)| Holding {
                    symbol: (*symbol).to_string(),
                    weight: *weight,
                })
                .collect(),
        }
    }

    /// Sum of all declared weights, CASH included.
    pub fn total_weight(&self) -> f64 {
        self.holdings.iter().map(|h| h.weight).sum()
    }
}
