//! Factor store and source traits.

use async_trait::async_trait;

use super::factors_model::{FactorLoadings, FactorRecord};
use crate::errors::Result;

/// Durable store for daily factor rows, keyed by date.
///
/// Same transactional contract as the NAV store: whole-batch upserts,
/// explicitly-empty reads.
#[async_trait]
pub trait FactorRepositoryTrait: Send + Sync {
    /// Replace-or-insert a batch of factor rows in one transaction.
    async fn upsert_factors(&self, records: &[FactorRecord]) -> Result<usize>;

    /// Number of stored factor rows.
    fn row_count(&self) -> Result<i64>;

    /// Every stored row, ascending by date, in source units (percent).
    fn read_all(&self) -> Result<Vec<FactorRecord>>;
}

/// Durable store for regression results, one current row per portfolio.
#[async_trait]
pub trait FactorLoadingsRepositoryTrait: Send + Sync {
    /// Replace-or-insert loadings for a batch of portfolios.
    async fn upsert_loadings(&self, loadings: &[FactorLoadings]) -> Result<usize>;

    /// Current loadings for every portfolio that has one.
    fn list(&self) -> Result<Vec<FactorLoadings>>;

    /// Deletes rows whose portfolio name is not in `keep`; returns the
    /// number pruned. Covers portfolio renames and removals.
    async fn delete_missing(&self, keep: &[String]) -> Result<usize>;
}

/// Provider of the external factor dataset (download + parse).
#[async_trait]
pub trait FactorSourceTrait: Send + Sync {
    /// Fetches the full daily factor history in source units (percent).
    async fn fetch(&self) -> Result<Vec<FactorRecord>>;
}
