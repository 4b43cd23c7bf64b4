// src/error.rs

use thiserror::Error;

/// Failures raised by the in-memory pipeline. All of them are fail-fast:
/// the caller gets the first offending row or argument and nothing is skipped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("schema error: {0}")]
    Schema(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("format error: {0}")]
    Format(String),
    #[error("input error: {0}")]
    Input(String),
    #[error("shape error: {0}")]
    Shape(String),
    #[error("frame error: {0}")]
    Frame(String),
}

impl From<polars::error::PolarsError> for PipelineError {
    fn from(err: polars::error::PolarsError) -> Self {
        PipelineError::Frame(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
