// src/error.rs

use std::{io, path::PathBuf};
use thiserror::Error;

/// Every way a single dataset run can fail.
///
/// All variants are fatal to the run that raised them. Only the fetch stage
/// retries, and it only surfaces `FetchFailed` once its retries are exhausted.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("fetching {url} failed after {attempts} attempt(s): {reason}")]
    FetchFailed {
        url: String,
        attempts: u32,
        reason: String,
    },

    #[error("building HTTP client failed: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("no <{tag}> at position {position} (step {step}, {available} candidate(s))")]
    TableNotFound {
        step: usize,
        tag: String,
        position: String,
        available: usize,
    },

    #[error("top-level key `{0}` missing from JSON payload")]
    MissingKey(String),

    #[error("no date found in `{0}`")]
    DateNotFound(String),

    #[error("unsupported number `{0}`: expected a trailing K, M or B")]
    UnsupportedSuffix(String),

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error("invalid percentage `{0}`")]
    InvalidPercentage(String),

    #[error("malformed link in `{0}`")]
    MalformedLink(String),

    #[error("column `{column}` missing from {dataset} table")]
    MissingColumn { dataset: String, column: String },

    #[error("unexpected layout: {0}")]
    UnexpectedLayout(String),

    #[error("I/O on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl PipelineError {
    /// Stable, machine-friendly name of the failure, used when reporting a run.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::FetchFailed { .. } => "FetchFailed",
            PipelineError::HttpClient(_) => "HttpClient",
            PipelineError::TableNotFound { .. } => "TableNotFound",
            PipelineError::MissingKey(_) => "MissingKey",
            PipelineError::DateNotFound(_) => "DateNotFound",
            PipelineError::UnsupportedSuffix(_) => "UnsupportedSuffix",
            PipelineError::InvalidNumber(_) => "InvalidNumber",
            PipelineError::InvalidPercentage(_) => "InvalidPercentage",
            PipelineError::MalformedLink(_) => "MalformedLink",
            PipelineError::MissingColumn { .. } => "MissingColumn",
            PipelineError::UnexpectedLayout(_) => "UnexpectedLayout",
            PipelineError::Io { .. } => "Io",
            PipelineError::Json(_) => "Json",
            PipelineError::Csv(_) => "Csv",
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
