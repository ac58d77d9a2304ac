use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] boardfile_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Failed to read {path}: {source}")]
    ReadFile { path: String, source: io::Error },
    #[error("Form field must look like NAME=VALUE: {0}")]
    InvalidField(String),
    #[error("No action URL configured. Pass --url or set BOARDFILE_ACTION_URL.")]
    MissingActionUrl,
    #[error("Submit was rejected")]
    SubmitRejected,
}
