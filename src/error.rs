use reqwest::StatusCode;
use thiserror::Error;
use tracing::error;

/// Everything that can stop a run.
#[derive(Debug, Error)]
pub(crate) enum TrackerError {
    #[error("could not set up the HTTP client: {0}")]
    ClientSetup(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with HTTP {status}")]
    HttpStatus { url: String, status: StatusCode },

    #[error("{url} did not return valid JSON: {source}")]
    JsonDecode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{endpoint} response is missing field `{field}`")]
    MissingField { endpoint: &'static str, field: String },

    #[error("{endpoint} response has unusable `{field}`: {value}")]
    InvalidField {
        endpoint: &'static str,
        field: String,
        value: String,
    },

    #[error("astronaut count {declared} does not match the {actual} people listed")]
    CountMismatch { declared: u64, actual: usize },

    #[error("could not load asset {path}: {reason}")]
    AssetLoad { path: String, reason: String },

    #[error("window error: {0}")]
    Window(String),
}

impl TrackerError {
    /// Fail-fast exit used for every unrecoverable error of a run.
    pub(crate) fn exit(&self) -> ! {
        error!(error = %self, "aborting run");
        println!("Problem Encountered: {self}");
        std::process::exit(1)
    }

    pub(crate) fn missing(endpoint: &'static str, field: impl Into<String>) -> TrackerError {
        TrackerError::MissingField { endpoint, field: field.into() }
    }

    pub(crate) fn invalid(endpoint: &'static str, field: impl Into<String>,
                          value: impl ToString) -> TrackerError {
        TrackerError::InvalidField { endpoint, field: field.into(), value: value.to_string() }
    }
}
