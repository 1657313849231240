pub mod factors_model;
pub mod factors_traits;
pub mod french_dataset;
pub mod regression_service;

pub use factors_model::*;
pub use factors_traits::*;
pub use french_dataset::{FactorDataError, FrenchFactorSource, FACTOR_DATA_URL};
pub use regression_service::{RegressionError, RegressionService, RegressionSummary};

#[cfg(test)]
mod regression_service_tests;
