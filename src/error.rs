use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::state::scoreboard::FinalStepError;

/// Convenient result alias returning [`FeedError`] failures.
pub type FeedResult<T> = Result<T, FeedError>;

/// Failures while polling the score feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The request could not be sent or timed out.
    #[error("feed unavailable at `{url}`")]
    Unavailable {
        /// Requested URL.
        url: String,
        /// Transport failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The feed answered with a non-success status code.
    #[error("unexpected feed response status {status} for `{url}`")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code received.
        status: u16,
    },
    /// The payload was not the expected JSON document.
    #[error("failed to decode feed response for `{url}`")]
    Decode {
        /// Requested URL.
        url: String,
        /// Decoding failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Operation cannot be performed in the current state.
    #[error("invalid state: {0}")]
    InvalidState(String),
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl From<FinalStepError> for ServiceError {
    fn from(err: FinalStepError) -> Self {
        match err {
            FinalStepError::NotStarted => {
                ServiceError::InvalidState("final countdown not started; start the final first".into())
            }
            FinalStepError::Finished => {
                ServiceError::InvalidState("final countdown finished; start the final again".into())
            }
            FinalStepError::Empty => ServiceError::NotFound("no teams on the scoreboard".into()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(format!("validation failed: {}", err))
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Unauthorized access attempt.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Conflict with current state.
    #[error("conflict: {0}")]
    Conflict(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::InvalidState(message) => AppError::Conflict(message),
            ServiceError::NotFound(message) => AppError::NotFound(message),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}
