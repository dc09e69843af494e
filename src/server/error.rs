use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::foundation::error::LifegridError;

/// Handler error for the wallpaper route.
///
/// Bodies are plain text; internal detail is only logged.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Unknown token, or a user without settings.
    #[error("wallpaper not found")]
    NotFound,

    /// Rendering failed after the data was resolved.
    #[error(transparent)]
    Render(#[from] LifegridError),

    /// The render task itself failed (panicked or was cancelled).
    #[error("internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not found").into_response(),
            AppError::Render(err) => {
                tracing::error!(error = %err, "wallpaper render failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Render failed").into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "wallpaper task failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
            }
        }
    }
}
