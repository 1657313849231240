use chrono::NaiveDate;

/// Simulated NAV every portfolio starts from on its inception day.
pub const INITIAL_CAPITAL: f64 = 100.0;

/// First trading day shown on the public equity curves.
pub const INCEPTION_DATE: &str = "2026-02-02";

/// Floor for the NAV history fed into factor regressions. Independent of the
/// display inception date; kept earlier so regressions stay meaningful as the
/// live window grows.
pub const REGRESSION_WINDOW_START: &str = "2025-01-01";

/// Trading days per year used for annualization.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Minimum overlapping observations required to fit a factor regression.
pub const MIN_REGRESSION_OBSERVATIONS: usize = 20;

/// Pseudo-symbol for uninvested capital. Never sent to the market data
/// provider and always contributes zero return.
pub const CASH_SYMBOL: &str = "CASH";

/// Returns the parsed display inception date.
pub fn inception_date() -> NaiveDate {
    INCEPTION_DATE
        .parse()
        .expect("INCEPTION_DATE is a valid ISO date")
}

/// Returns the parsed regression lookback floor.
pub fn regression_window_start() -> NaiveDate {
    REGRESSION_WINDOW_START
        .parse()
        .expect("REGRESSION_WINDOW_START is a valid ISO date")
}
