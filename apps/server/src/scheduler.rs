//! Background scheduler for the daily data refresh.
//!
//! Runs the startup sync immediately, then a fixed daily refresh that only
//! does work on weekdays (there is nothing new to fetch on weekends).

use std::sync::Arc;

use chrono::{Datelike, Weekday};
use tokio::time::{interval, Duration};
use tracing::{debug, info};

use crate::main_lib::AppState;

/// One refresh per day; NAVs first, factors after.
const REFRESH_INTERVAL_SECS: u64 = 24 * 60 * 60;

/// Starts the startup sync and the recurring refresh loop.
pub fn start_refresh_scheduler(state: Arc<AppState>) {
    tokio::spawn(async move {
        info!("Refresh scheduler started (daily, weekdays only)");

        state.sync_service.startup().await;

        let mut refresh_interval = interval(Duration::from_secs(REFRESH_INTERVAL_SECS));
        // The first tick fires immediately; the startup sync covered it.
        refresh_interval.tick().await;

        loop {
            refresh_interval.tick().await;
            run_scheduled_refresh(&state).await;
        }
    });
}

async fn run_scheduled_refresh(state: &Arc<AppState>) {
    let weekday = chrono::Local::now().date_naive().weekday();
    if matches!(weekday, Weekday::Sat | Weekday::Sun) {
        debug!("Scheduled refresh skipped: {:?}", weekday);
        return;
    }

    info!("Running scheduled refresh");
    let nav_status = state.sync_service.sync_navs().await;
    if !nav_status.success {
        info!(
            "Scheduled NAV refresh reported failure: {:?}",
            nav_status.error
        );
    }

    let factor_status = state.sync_service.sync_factors().await;
    if !factor_status.success {
        info!(
            "Scheduled factor refresh reported failure: {:?}",
            factor_status.error
        );
    }
}
