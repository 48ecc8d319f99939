use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shorty_core::{ShortenerError, StorageError};
use thiserror::Error;
use tracing::{error, warn};

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by the HTTP handlers.
///
/// Bodies are short plain-text messages; internals are logged, never echoed.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("invalid content type")]
    UnsupportedMediaType,
    #[error("database is not configured")]
    DatabaseNotConfigured,
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, *msg),
            ApiError::UnsupportedMediaType => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "invalid content type")
            }
            ApiError::DatabaseNotConfigured => {
                warn!("ping requested without a database backend");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
            ApiError::Shortener(err) => match err {
                ShortenerError::InvalidUrl(_) => (StatusCode::BAD_REQUEST, "Invalid URL"),
                ShortenerError::InvalidShortCode(_) => (StatusCode::BAD_REQUEST, "URL not found"),
                ShortenerError::Storage(StorageError::NotFound(_)) => {
                    (StatusCode::BAD_REQUEST, "URL not found")
                }
                ShortenerError::Persist { source, .. } if !source.is_failure() => {
                    warn!(error = %err, cause = %source, "short code collision");
                    (StatusCode::CONFLICT, "Short URL already exists")
                }
                other => {
                    error!(error = ?other, "shortener failure");
                    (StatusCode::INTERNAL_SERVER_ERROR, "Server error")
                }
            },
            ApiError::Storage(err) => {
                error!(error = %err, "storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error")
            }
        };

        (status, message).into_response()
    }
}
