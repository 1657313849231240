//! Retrieval and parsing of the daily five-factor dataset.
//!
//! The upstream file is a zipped CSV with free-form headers, an annual
//! summary block, and a copyright footer. A data row is any line whose first
//! comma-delimited field is an 8-digit YYYYMMDD date followed by six numeric
//! fields (Mkt-RF, SMB, HML, RMW, CMA, RF); everything else is silently
//! skipped.

use std::io::{Cursor, Read};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info};
use thiserror::Error;

use super::factors_model::FactorRecord;
use super::factors_traits::FactorSourceTrait;
use crate::errors::Result;

/// Daily five-factor research data, zipped CSV.
pub const FACTOR_DATA_URL: &str =
    "https://mba.tuck.dartmouth.edu/pages/faculty/ken.french/ftp/F-F_Research_Data_5_Factors_2x3_daily_CSV.zip";

/// Hard bound on the dataset download.
const DOWNLOAD_TIMEOUT_SECS: u64 = 60;

/// Errors from factor dataset retrieval and parsing.
#[derive(Error, Debug)]
pub enum FactorDataError {
    #[error("Factor dataset download failed: {0}")]
    Download(String),

    #[error("Factor archive unreadable: {0}")]
    Archive(String),

    #[error("Factor archive contained no parseable data rows")]
    Empty,
}

/// Downloads and parses the zipped factor CSV from the research library.
pub struct FrenchFactorSource {
    client: reqwest::Client,
    url: String,
}

impl FrenchFactorSource {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DOWNLOAD_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            client,
            url: FACTOR_DATA_URL.to_string(),
        }
    }

    /// Overrides the download URL (tests, mirrors).
    pub fn with_url(url: &str) -> Self {
        let mut source = Self::new();
        source.url = url.to_string();
        source
    }
}

impl Default for FrenchFactorSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FactorSourceTrait for FrenchFactorSource {
    async fn fetch(&self) -> Result<Vec<FactorRecord>> {
        info!("Downloading factor dataset from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| FactorDataError::Download(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FactorDataError::Download(e.to_string()))?;

        let text = extract_csv(&bytes)?;
        let records = parse_factor_csv(&text);

        if records.is_empty() {
            return Err(FactorDataError::Empty.into());
        }

        info!("Parsed {} factor rows", records.len());
        Ok(records)
    }
}

/// Pulls the first CSV entry out of the zip archive as text.
fn extract_csv(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| FactorDataError::Archive(e.to_string()))?;

    let index = (0..archive.len())
        .find(|&i| {
            archive
                .by_index(i)
                .map(|entry| entry.name().to_ascii_lowercase().ends_with(".csv"))
                .unwrap_or(false)
        })
        .ok_or_else(|| FactorDataError::Archive("no CSV entry in archive".to_string()))?;

    let mut entry = archive
        .by_index(index)
        .map_err(|e| FactorDataError::Archive(e.to_string()))?;

    let mut text = String::new();
    entry
        .read_to_string(&mut text)
        .map_err(|e| FactorDataError::Archive(e.to_string()))?;

    debug!("Extracted {} ({} bytes)", entry.name(), text.len());
    Ok(text)
}

/// Parses the CSV text, keeping only conforming daily data rows.
pub fn parse_factor_csv(text: &str) -> Vec<FactorRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut records = Vec::new();
    for row in reader.records() {
        let Ok(row) = row else { continue };
        if let Some(record) = parse_row(&row) {
            records.push(record);
        }
    }
    records
}

/// One row: an 8-digit date and exactly six numeric fields, or nothing.
fn parse_row(row: &csv::StringRecord) -> Option<FactorRecord> {
    let date = parse_yyyymmdd(row.get(0)?)?;

    let mut values = [0.0; 6];
    for (slot, field_index) in values.iter_mut().zip(1..=6) {
        *slot = row.get(field_index)?.parse::<f64>().ok()?;
    }

    let [mkt_rf, smb, hml, rmw, cma, rf] = values;
    Some(FactorRecord {
        date,
        mkt_rf,
        smb,
        hml,
        rmw,
        cma,
        rf,
    })
}

fn parse_yyyymmdd(field: &str) -> Option<NaiveDate> {
    if field.len() != 8 || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = field[0..4].parse().ok()?;
    let month: u32 = field[4..6].parse().ok()?;
    let day: u32 = field[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
