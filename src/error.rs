//! Error types for stack requests.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A builder method was given an empty key or value.
    #[error("invalid parameter: key {key:?} and value {value:?} must both be non-empty strings")]
    InvalidParameter { key: String, value: String },

    /// `fetch` was called on a builder that has no asset uid.
    #[error("missing asset uid, e.g. stack.asset(\"asset_uid\")")]
    MissingIdentifier,

    #[error("invalid stack configuration: {0}")]
    Config(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("api error {status}: {message}")]
    Api {
        status: StatusCode,
        message: String,
        error_code: Option<i64>,
    },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_parameter(key: &str, value: &str) -> Self {
        Error::InvalidParameter {
            key: key.to_string(),
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
