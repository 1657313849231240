//! NAV store trait.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::navs_model::{NavCurveSet, NavRecord};
use crate::errors::Result;

/// Durable, idempotent store for NAV records keyed by (date, portfolio).
///
/// Writes are whole-batch transactional: either every row of an upsert
/// commits or none does. Reads tolerate an empty store and return an
/// explicitly-empty result so callers can distinguish "no data yet" from a
/// transport failure.
#[async_trait]
pub trait NavRepositoryTrait: Send + Sync {
    /// Replace-or-insert a batch of NAV records in one transaction.
    /// Returns the number of rows written.
    async fn upsert_navs(&self, records: &[NavRecord]) -> Result<usize>;

    /// The pivoted date x portfolio table for dates >= `since`, ascending.
    fn read_since(&self, since: NaiveDate) -> Result<NavCurveSet>;

    /// The most recent date with any NAV row, if one exists.
    fn latest_date(&self) -> Result<Option<NaiveDate>>;
}
