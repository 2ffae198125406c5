//! External service interactions
//!
//! Loading datasets from JSON, YAML and CSV files.

pub mod dataset;

pub use dataset::{load as load_dataset, sample as sample_dataset, Dataset};
