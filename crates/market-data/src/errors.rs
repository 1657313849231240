//! Error types for the market data crate.

use thiserror::Error;

/// Errors that can occur during market data operations.
#[derive(Error, Debug)]
pub enum MarketDataError {
    /// The requested symbol was not found by the provider.
    /// This is a terminal error - retrying won't help.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// No data available for the requested date range.
    /// The symbol exists but has no quotes in the specified period.
    #[error("No data for date range")]
    NoDataForRange,

    /// The provider returned nothing for the whole symbol universe,
    /// even after the sequential retry.
    #[error("Provider returned no data for any of {requested} symbols (start {start})")]
    EmptyResponse {
        /// Number of symbols requested
        requested: usize,
        /// Start of the requested range (ISO date)
        start: String,
    },

    /// The request to the provider timed out.
    #[error("Timeout after {seconds}s: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: String,
        /// The configured timeout bound
        seconds: u64,
    },

    /// A provider-specific error occurred.
    #[error("Provider error: {provider} - {message}")]
    ProviderError {
        /// The provider that returned the error
        provider: String,
        /// The error message from the provider
        message: String,
    },
}
