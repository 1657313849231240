pub mod equity_engine;

pub use equity_engine::*;

#[cfg(test)]
mod equity_engine_tests;
