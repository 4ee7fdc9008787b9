use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Transport failure: connect, DNS, timeout, broken body stream
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Upstream answered with a non-success status
    #[error("TMDB API returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed TMDB payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// True for failures of the remote catalogue (as opposed to bad caller input)
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::Network(_) | AppError::Api { .. } | AppError::MalformedPayload(_)
        )
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::MalformedPayload(err.to_string())
        } else if let Some(status) = err.status() {
            AppError::Api {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            AppError::Network(err)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Network(_) | AppError::Api { .. } | AppError::MalformedPayload(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
