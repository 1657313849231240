pub mod sync_model;
pub mod sync_service;

pub use sync_model::*;
pub use sync_service::*;

#[cfg(test)]
mod sync_service_tests;
