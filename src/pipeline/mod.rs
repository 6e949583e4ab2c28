//! Pipeline module - the analysis stages, each consuming the previous
//! stage's table and producing a derived one

pub mod config;
pub mod correlation;
pub mod encoding;
pub mod error;
pub mod loader;
pub mod outliers;
pub mod split;
pub mod standardize;
pub mod stats;

pub use config::*;
pub use correlation::*;
pub use encoding::*;
pub use error::PipelineError;
pub use loader::*;
pub use outliers::*;
pub use split::*;
pub use standardize::*;
pub use stats::*;
