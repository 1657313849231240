//! Application state wiring and tracing setup.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use crate::models::PortfolioSeriesResponse;
use modelfolio_core::cache::{InvalidateCache, ResponseCache};
use modelfolio_core::factors::{
    FactorLoadingsRepositoryTrait, FactorRepositoryTrait, FrenchFactorSource, RegressionService,
};
use modelfolio_core::navs::NavRepositoryTrait;
use modelfolio_core::portfolios::{self, Portfolio};
use modelfolio_core::sync::SyncService;
use modelfolio_market_data::YahooProvider;
use modelfolio_storage_sqlite::db;
use modelfolio_storage_sqlite::factors::{FactorLoadingsRepository, FactorRepository};
use modelfolio_storage_sqlite::navs::NavRepository;

/// TTL of the portfolio-series payload memo.
const SERIES_CACHE_TTL: Duration = Duration::from_secs(15);

/// TTL of the outlook document memo.
const OUTLOOK_CACHE_TTL: Duration = Duration::from_secs(300);

pub struct AppState {
    pub catalog: Arc<Vec<Portfolio>>,
    pub nav_repository: Arc<dyn NavRepositoryTrait>,
    pub loadings_repository: Arc<dyn FactorLoadingsRepositoryTrait>,
    pub sync_service: Arc<SyncService>,
    pub series_cache: Arc<ResponseCache<PortfolioSeriesResponse>>,
    pub outlook_cache: Arc<ResponseCache<serde_json::Value>>,
    pub outlook_path: PathBuf,
}

pub fn init_tracing() {
    let log_format = std::env::var("MF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let pool = Arc::new(db::init(&config.db_path)?);
    let writer = db::spawn_writer((*pool).clone());

    let nav_repository: Arc<dyn NavRepositoryTrait> =
        Arc::new(NavRepository::new(pool.clone(), writer.clone()));
    let factor_repository: Arc<dyn FactorRepositoryTrait> =
        Arc::new(FactorRepository::new(pool.clone(), writer.clone()));
    let loadings_repository: Arc<dyn FactorLoadingsRepositoryTrait> =
        Arc::new(FactorLoadingsRepository::new(pool, writer));

    let catalog = Arc::new(portfolios::catalog());
    let price_provider = Arc::new(YahooProvider::new()?);
    let factor_source = Arc::new(FrenchFactorSource::new());

    let regression_service = Arc::new(RegressionService::new(
        nav_repository.clone(),
        factor_repository.clone(),
        loadings_repository.clone(),
    ));

    let series_cache = Arc::new(ResponseCache::new(SERIES_CACHE_TTL));
    let outlook_cache = Arc::new(ResponseCache::new(OUTLOOK_CACHE_TTL));

    let caches: Vec<Arc<dyn InvalidateCache>> = vec![series_cache.clone()];
    let sync_service = Arc::new(SyncService::new(
        catalog.clone(),
        price_provider,
        nav_repository.clone(),
        factor_repository,
        factor_source,
        regression_service,
        caches,
    ));

    Ok(Arc::new(AppState {
        catalog,
        nav_repository,
        loadings_repository,
        sync_service,
        series_cache,
        outlook_cache,
        outlook_path: PathBuf::from(&config.outlook_path),
    }))
}
