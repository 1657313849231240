//! Market data provider trait definitions.

mod yahoo;

pub use yahoo::YahooProvider;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::MarketDataError;
use crate::models::PriceHistory;

/// Trait for providers of daily adjusted price history.
///
/// Implementations fetch the full history for a universe of symbols in one
/// call. A symbol that yields no data must be omitted from the result, not
/// reported as an error; only a wholesale empty response (after the
/// provider's internal retry) is an error.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Unique identifier for this provider, e.g. "YAHOO".
    fn id(&self) -> &'static str;

    /// Fetch daily adjusted closes for `symbols` from `start` to today.
    async fn daily_history(
        &self,
        symbols: &[String],
        start: NaiveDate,
    ) -> Result<PriceHistory, MarketDataError>;
}
