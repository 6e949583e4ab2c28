//! Report module - evaluation metrics, terminal tables and JSON export

pub mod evaluation;
pub mod export;
pub mod tables;

pub use evaluation::*;
pub use export::*;
pub use tables::*;
