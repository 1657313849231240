use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use super::model::{NavRowDB, DATE_FORMAT};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::portfolio_navs::dsl as navs_dsl;
use modelfolio_core::navs::{NavCurveSet, NavRecord, NavRepositoryTrait};
use modelfolio_core::Result;

pub struct NavRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl NavRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl NavRepositoryTrait for NavRepository {
    async fn upsert_navs(&self, records: &[NavRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let db_rows: Vec<NavRowDB> = records.iter().map(NavRowDB::from).collect();

        // One writer job = one immediate transaction for the whole batch.
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut total_upserted = 0;
                for chunk in db_rows.chunks(1_000) {
                    total_upserted += diesel::replace_into(navs_dsl::portfolio_navs)
                        .values(chunk)
                        .execute(conn)
                        .map_err(StorageError::QueryFailed)?;
                }
                Ok(total_upserted)
            })
            .await
    }

    fn read_since(&self, since: NaiveDate) -> Result<NavCurveSet> {
        let mut conn = get_connection(&self.pool)?;
        let floor = since.format(DATE_FORMAT).to_string();

        let rows = navs_dsl::portfolio_navs
            .filter(navs_dsl::date.ge(floor))
            .order((navs_dsl::date.asc(), navs_dsl::portfolio_name.asc()))
            .load::<NavRowDB>(&mut conn)
            .into_core()?;

        let records: Vec<NavRecord> = rows
            .into_iter()
            .map(NavRowDB::into_domain)
            .collect::<Result<_>>()?;

        Ok(NavCurveSet::from_records(&records))
    }

    fn latest_date(&self) -> Result<Option<NaiveDate>> {
        let mut conn = get_connection(&self.pool)?;

        let latest: Option<String> = navs_dsl::portfolio_navs
            .select(navs_dsl::date)
            .order(navs_dsl::date.desc())
            .first::<String>(&mut conn)
            .optional()
            .into_core()?;

        match latest {
            Some(text) => {
                let date = text.parse().map_err(|e| {
                    modelfolio_core::Error::Repository(format!("bad stored date '{}': {}", text, e))
                })?;
                Ok(Some(date))
            }
            None => Ok(None),
        }
    }
}
