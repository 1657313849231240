pub mod return_table;

pub use return_table::*;
