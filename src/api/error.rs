use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure of a call to the hosted backend (auth or task table).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The service answered with an error body that carried a message.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Non-success status without a usable message.
    #[error("request failed with status {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Insert returned no row.
    #[error("the store returned no row")]
    EmptyResponse,

    #[error("not signed in")]
    NotSignedIn,
}

impl ApiError {
    /// Text suitable for the error banner, when the failure carries any.
    ///
    /// Bare status failures return `None` so callers can fall back to their
    /// own per-operation wording.
    pub fn message(&self) -> Option<String> {
        match self {
            ApiError::Status(_) => None,
            other => Some(other.to_string()),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Rejected { status, .. } | ApiError::Status(status) => Some(*status),
            ApiError::Network(error) => error.status().map(|status| status.as_u16()),
            _ => None,
        }
    }

    /// Builds the error for a non-success response body.
    ///
    /// PostgREST reports `message`, GoTrue uses `error_description`, `msg`
    /// or `message` depending on the endpoint and version.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            message: Option<String>,
            msg: Option<String>,
            error_description: Option<String>,
        }

        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|body| body.error_description.or(body.msg).or(body.message))
            .filter(|message| !message.trim().is_empty());

        match message {
            Some(message) => ApiError::Rejected {
                status: status.as_u16(),
                message,
            },
            None => ApiError::Status(status.as_u16()),
        }
    }
}
