use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use super::model::{FactorLoadingsDB, FactorRowDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::factor_loadings::dsl as loadings_dsl;
use crate::schema::factor_returns::dsl as factors_dsl;
use modelfolio_core::factors::{
    FactorLoadings, FactorLoadingsRepositoryTrait, FactorRecord, FactorRepositoryTrait,
};
use modelfolio_core::Result;

pub struct FactorRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FactorRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl FactorRepositoryTrait for FactorRepository {
    async fn upsert_factors(&self, records: &[FactorRecord]) -> Result<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let db_rows: Vec<FactorRowDB> = records.iter().map(FactorRowDB::from).collect();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let mut total_upserted = 0;
                for chunk in db_rows.chunks(1_000) {
                    total_upserted += diesel::replace_into(factors_dsl::factor_returns)
                        .values(chunk)
                        .execute(conn)
                        .map_err(StorageError::QueryFailed)?;
                }
                Ok(total_upserted)
            })
            .await
    }

    fn row_count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        factors_dsl::factor_returns
            .count()
            .get_result(&mut conn)
            .into_core()
    }

    fn read_all(&self) -> Result<Vec<FactorRecord>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = factors_dsl::factor_returns
            .order(factors_dsl::date.asc())
            .load::<FactorRowDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(FactorRowDB::into_domain).collect()
    }
}

pub struct FactorLoadingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl FactorLoadingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl FactorLoadingsRepositoryTrait for FactorLoadingsRepository {
    async fn upsert_loadings(&self, loadings: &[FactorLoadings]) -> Result<usize> {
        if loadings.is_empty() {
            return Ok(0);
        }

        let db_rows: Vec<FactorLoadingsDB> = loadings.iter().map(FactorLoadingsDB::from).collect();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::replace_into(loadings_dsl::factor_loadings)
                    .values(&db_rows)
                    .execute(conn)
                    .map_err(|e| StorageError::QueryFailed(e).into())
            })
            .await
    }

    fn list(&self) -> Result<Vec<FactorLoadings>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = loadings_dsl::factor_loadings
            .order(loadings_dsl::portfolio_name.asc())
            .load::<FactorLoadingsDB>(&mut conn)
            .into_core()?;

        rows.into_iter().map(FactorLoadingsDB::into_domain).collect()
    }

    async fn delete_missing(&self, keep: &[String]) -> Result<usize> {
        let keep = keep.to_vec();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(
                    loadings_dsl::factor_loadings
                        .filter(loadings_dsl::portfolio_name.ne_all(keep)),
                )
                .execute(conn)
                .map_err(|e| StorageError::QueryFailed(e).into())
            })
            .await
    }
}
