// src/error.rs

use reqwest::StatusCode;

/// Result type for every library operation.
pub type Result<T> = std::result::Result<T, CensusError>;

/// Everything that can go wrong between a state name and a CSV file.
#[derive(Debug, thiserror::Error)]
pub enum CensusError {
    #[error("unknown state name: {0:?}")]
    StateNotFound(String),

    #[error("invalid state code: {0:?}")]
    InvalidStateCode(String),

    #[error("at least one variable code is required")]
    EmptyVariables,

    #[error("API request failed ({status}): {body}")]
    Api { status: StatusCode, body: String },

    #[error("malformed API response: {0}")]
    Malformed(#[from] MalformedResponse),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Ways the upstream body can fail to be a header-plus-rows table.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MalformedResponse {
    #[error("empty body")]
    EmptyBody,

    #[error("not an array of string arrays: {0}")]
    NotATable(String),

    #[error("no header row")]
    MissingHeader,

    #[error("header {found:?} does not start with {expected:?}")]
    UnexpectedHeader {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("row {row} has {found} values, header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}
