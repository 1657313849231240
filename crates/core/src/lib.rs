//! Modelfolio Core - Domain entities, services, and traits.
//!
//! This crate contains the NAV computation and factor-regression pipeline.
//! It is database-agnostic and defines store traits that are implemented
//! by the `storage-sqlite` crate.

pub mod cache;
pub mod constants;
pub mod equity;
pub mod errors;
pub mod factors;
pub mod navs;
pub mod performance;
pub mod portfolios;
pub mod returns;
pub mod sync;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
