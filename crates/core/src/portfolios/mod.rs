pub mod portfolios_catalog;
pub mod portfolios_model;

pub use portfolios_catalog::catalog;
pub use portfolios_model::*;
