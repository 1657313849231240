//! Modelfolio Market Data Crate
//!
//! This crate provides the raw daily price history used to simulate the
//! model portfolios. It is deliberately thin: callers hand it a list of
//! market-facing symbols and a start date, and get back a per-symbol table
//! of adjusted daily closes.
//!
//! # Overview
//!
//! - One provider: Yahoo Finance (via `yahoo_finance_api`)
//! - Per-symbol failures are tolerated; a symbol that returns nothing is
//!   simply absent from the resulting table
//! - A wholesale empty response is retried once with a sequential fetch
//!   strategy before being reported as an error
//! - Every network call is bounded by a fixed timeout
//!
//! # Core Types
//!
//! - [`PriceHistory`] - symbol -> date -> adjusted close
//! - [`PriceHistoryProvider`] - the provider trait implemented by Yahoo
//! - [`MarketDataError`] - error taxonomy for fetch failures

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::PriceHistory;
pub use provider::{PriceHistoryProvider, YahooProvider};
