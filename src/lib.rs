//! Fraudscope: Exploratory Fraud Analysis Library
//!
//! A library for batch analysis of transaction datasets: descriptive
//! statistics, IQR outlier flagging, z-score standardization, correlation
//! analysis and a random forest fraud classifier with evaluation reporting.

pub mod cli;
pub mod model;
pub mod pipeline;
pub mod report;
pub mod utils;
