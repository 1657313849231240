//! Diesel row types for the factor and loadings stores.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::navs::model::DATE_FORMAT;
use crate::schema::{factor_loadings, factor_returns};
use modelfolio_core::errors::{Error, Result};
use modelfolio_core::factors::{FactorLoadings, FactorRecord};

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = factor_returns)]
pub struct FactorRowDB {
    pub date: String,
    pub mkt_rf: f64,
    pub smb: f64,
    pub hml: f64,
    pub rmw: f64,
    pub cma: f64,
    pub rf: f64,
}

impl From<&FactorRecord> for FactorRowDB {
    fn from(record: &FactorRecord) -> Self {
        Self {
            date: record.date.format(DATE_FORMAT).to_string(),
            mkt_rf: record.mkt_rf,
            smb: record.smb,
            hml: record.hml,
            rmw: record.rmw,
            cma: record.cma,
            rf: record.rf,
        }
    }
}

impl FactorRowDB {
    pub fn into_domain(self) -> Result<FactorRecord> {
        let date = self
            .date
            .parse()
            .map_err(|e| Error::Repository(format!("bad stored date '{}': {}", self.date, e)))?;
        Ok(FactorRecord {
            date,
            mkt_rf: self.mkt_rf,
            smb: self.smb,
            hml: self.hml,
            rmw: self.rmw,
            cma: self.cma,
            rf: self.rf,
        })
    }
}

#[derive(Debug, Clone, Queryable, Insertable)]
#[diesel(table_name = factor_loadings)]
pub struct FactorLoadingsDB {
    pub portfolio_name: String,
    pub alpha: f64,
    pub beta_mkt: f64,
    pub beta_smb: f64,
    pub beta_hml: f64,
    pub beta_rmw: f64,
    pub beta_cma: f64,
    pub r_squared: f64,
    pub observations: i64,
    pub computed_at: String,
}

impl From<&FactorLoadings> for FactorLoadingsDB {
    fn from(loadings: &FactorLoadings) -> Self {
        Self {
            portfolio_name: loadings.portfolio_name.clone(),
            alpha: loadings.alpha,
            beta_mkt: loadings.beta_mkt,
            beta_smb: loadings.beta_smb,
            beta_hml: loadings.beta_hml,
            beta_rmw: loadings.beta_rmw,
            beta_cma: loadings.beta_cma,
            r_squared: loadings.r_squared,
            observations: loadings.observations,
            computed_at: loadings.computed_at.to_rfc3339(),
        }
    }
}

impl FactorLoadingsDB {
    pub fn into_domain(self) -> Result<FactorLoadings> {
        let computed_at = DateTime::parse_from_rfc3339(&self.computed_at)
            .map_err(|e| {
                Error::Repository(format!("bad stored timestamp '{}': {}", self.computed_at, e))
            })?
            .with_timezone(&Utc);
        Ok(FactorLoadings {
            portfolio_name: self.portfolio_name,
            alpha: self.alpha,
            beta_mkt: self.beta_mkt,
            beta_smb: self.beta_smb,
            beta_hml: self.beta_hml,
            beta_rmw: self.beta_rmw,
            beta_cma: self.beta_cma,
            r_squared: self.r_squared,
            observations: self.observations,
            computed_at,
        })
    }
}
