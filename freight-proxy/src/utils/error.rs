//! Request errors
//!
//! Print failures are not errors at this level: they are answered with a
//! `200` and a failed [`PrintOutcome`]. Only requests the proxy cannot act
//! on at all become an [`AppError`], still rendered as a `PrintOutcome` so
//! clients parse one body shape.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use shared::error::PrintErrorCode;
use shared::print::PrintOutcome;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed request (400)
    #[error("Invalid request: {0}")]
    Invalid(String),
}

impl AppError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, outcome) = match &self {
            AppError::Invalid(msg) => {
                warn!(error = %msg, "Rejected print request");
                (
                    StatusCode::BAD_REQUEST,
                    PrintOutcome::failure(PrintErrorCode::InvalidConfig, msg.clone()),
                )
            }
        };

        (status, Json(outcome)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
