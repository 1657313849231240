//! Yahoo Finance price history provider.
//!
//! Fetches adjusted daily closes for the portfolio symbol universe. The
//! primary strategy fetches all symbols concurrently; if that yields no data
//! at all, a single sequential retry is made before giving up.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use time::OffsetDateTime;
use tracing::{debug, warn};
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::PriceHistory;
use crate::provider::PriceHistoryProvider;

/// Hard bound on any single provider round-trip.
const FETCH_TIMEOUT_SECS: u64 = 60;

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self { connector })
    }

    /// Convert a chrono date to the time::OffsetDateTime the Yahoo API expects.
    fn to_offset_datetime(date: NaiveDate) -> OffsetDateTime {
        let timestamp = date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp())
            .unwrap_or(0);
        OffsetDateTime::from_unix_timestamp(timestamp).unwrap_or_else(|_| OffsetDateTime::now_utc())
    }

    /// Fetch one symbol's adjusted close series, bounded by the fetch timeout.
    async fn fetch_symbol(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: DateTime<Utc>,
    ) -> Result<BTreeMap<NaiveDate, f64>, MarketDataError> {
        let start_time = Self::to_offset_datetime(start);
        let end_time = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .unwrap_or_else(|_| OffsetDateTime::now_utc());

        let request = self
            .connector
            .get_quote_history(symbol, start_time, end_time);

        let response = tokio::time::timeout(Duration::from_secs(FETCH_TIMEOUT_SECS), request)
            .await
            .map_err(|_| MarketDataError::Timeout {
                provider: "YAHOO".to_string(),
                seconds: FETCH_TIMEOUT_SECS,
            })?
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    MarketDataError::SymbolNotFound(symbol.to_string())
                } else {
                    MarketDataError::ProviderError {
                        provider: "YAHOO".to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        let quotes = response.quotes().map_err(|e| match e {
            yahoo::YahooError::NoQuotes => MarketDataError::NoDataForRange,
            other => MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: other.to_string(),
            },
        })?;

        let mut series = BTreeMap::new();
        for quote in quotes {
            let Some(date) = DateTime::from_timestamp(quote.timestamp as i64, 0) else {
                warn!("Skipping quote with invalid timestamp for {}", symbol);
                continue;
            };
            if quote.adjclose.is_finite() && quote.adjclose > 0.0 {
                series.insert(date.date_naive(), quote.adjclose);
            }
        }

        if series.is_empty() {
            return Err(MarketDataError::NoDataForRange);
        }

        Ok(series)
    }

    /// Primary strategy: fetch every symbol concurrently.
    async fn fetch_concurrent(
        &self,
        symbols: &[String],
        start: NaiveDate,
        end: DateTime<Utc>,
    ) -> PriceHistory {
        let fetches = symbols
            .iter()
            .map(|symbol| async move { (symbol, self.fetch_symbol(symbol, start, end).await) });

        let mut history = PriceHistory::new();
        for (symbol, result) in futures::future::join_all(fetches).await {
            match result {
                Ok(series) => history.insert_series(symbol, series),
                Err(e) => warn!("No usable history for {}: {}", symbol, e),
            }
        }
        history
    }

    /// Backup strategy: fetch one symbol at a time.
    async fn fetch_sequential(
        &self,
        symbols: &[String],
        start: NaiveDate,
        end: DateTime<Utc>,
    ) -> PriceHistory {
        let mut history = PriceHistory::new();
        for symbol in symbols {
            match self.fetch_symbol(symbol, start, end).await {
                Ok(series) => history.insert_series(symbol, series),
                Err(e) => warn!("No usable history for {} (sequential): {}", symbol, e),
            }
        }
        history
    }
}

#[async_trait]
impl PriceHistoryProvider for YahooProvider {
    fn id(&self) -> &'static str {
        "YAHOO"
    }

    async fn daily_history(
        &self,
        symbols: &[String],
        start: NaiveDate,
    ) -> Result<PriceHistory, MarketDataError> {
        let end = Utc::now();

        debug!(
            "Fetching daily history for {} symbols from {}",
            symbols.len(),
            start
        );

        let history = self.fetch_concurrent(symbols, start, end).await;
        if !history.is_empty() {
            return Ok(history);
        }

        warn!("Concurrent fetch returned no data, retrying sequentially");

        let history = self.fetch_sequential(symbols, start, end).await;
        if !history.is_empty() {
            return Ok(history);
        }

        Err(MarketDataError::EmptyResponse {
            requested: symbols.len(),
            start: start.to_string(),
        })
    }
}
