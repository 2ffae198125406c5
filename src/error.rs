//! Error types for the component library
//!
//! Application code wraps these in `anyhow::Error`; the library returns
//! them directly so callers can match on the variant.

/// Invalid column configuration, reported when a table is built or its
/// columns are replaced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("column at position {index} has no field")]
    MissingField { index: usize },
    #[error("column field '{field}' is declared twice (positions {first} and {second})")]
    DuplicateField {
        field: String,
        first: usize,
        second: usize,
    },
}

/// Failure to load a dataset file into table items.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid YAML dataset: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid CSV dataset: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported dataset format '{0}' (expected json, yaml, yml or csv)")]
    UnsupportedFormat(String),
    #[error("record {index} is not an object")]
    NotAnObject { index: usize },
}
