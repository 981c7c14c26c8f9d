use chrono::NaiveDate;
use thiserror::Error;

/// Rejected command-line input. Raised before any request is attempted.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgsError {
    #[error("username required")]
    MissingArgument,

    #[error("username must be a short-MD5 hash (24 lowercase hex characters), got {0:?}")]
    InvalidUsername(String),

    #[error("invalid date option: {0:?}")]
    InvalidDate(String),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Args(#[from] ArgsError),

    #[error("date {0} has no following day")]
    DateOutOfRange(NaiveDate),

    #[error("invalid request url: {0}")]
    InvalidUrl(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected http status: {status}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("invalid json in response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
