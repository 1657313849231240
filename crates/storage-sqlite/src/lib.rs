//! SQLite storage implementation for Modelfolio.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the store traits defined in `modelfolio-core`
//! and contains:
//! - Database connection pooling and management
//! - Embedded Diesel migrations
//! - Repository implementations for the NAV, factor, and loadings stores
//! - Database-specific row types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. Everything else is database-agnostic and works with traits.
//!
//! Writes are funneled through a single writer actor holding one dedicated
//! connection; each job runs inside an immediate transaction, which gives
//! every batch upsert all-or-nothing semantics. Reads go straight to the
//! pool and never observe a partially-written batch.

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod factors;
pub mod navs;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from modelfolio-core for convenience
pub use modelfolio_core::errors::{DatabaseError, Error, Result};
