//! Diesel row types for the NAV store.

use diesel::prelude::*;

use crate::schema::portfolio_navs;
use modelfolio_core::errors::{Error, Result};
use modelfolio_core::navs::NavRecord;

/// Storage format for dates, lexicographically ordered like the dates
/// themselves.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = portfolio_navs)]
pub struct NavRowDB {
    pub date: String,
    pub portfolio_name: String,
    pub nav: f64,
}

impl From<&NavRecord> for NavRowDB {
    fn from(record: &NavRecord) -> Self {
        Self {
            date: record.date.format(DATE_FORMAT).to_string(),
            portfolio_name: record.portfolio_name.clone(),
            nav: record.nav,
        }
    }
}

impl NavRowDB {
    /// Converts back to the domain record; a malformed stored date is a
    /// storage-layer defect surfaced as an internal error.
    pub fn into_domain(self) -> Result<NavRecord> {
        let date = self
            .date
            .parse()
            .map_err(|e| Error::Repository(format!("bad stored date '{}': {}", self.date, e)))?;
        Ok(NavRecord {
            date,
            portfolio_name: self.portfolio_name,
            nav: self.nav,
        })
    }
}
