pub mod navs_model;
pub mod navs_traits;

pub use navs_model::*;
pub use navs_traits::*;

#[cfg(test)]
mod navs_model_tests;
