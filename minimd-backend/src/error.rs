//! Error types for the note store.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use minimd_types::ErrorBody;
use thiserror::Error;

/// Failures that can occur while reading or writing notes.
///
/// A missing note is not an error at this layer: lookups return `Ok(None)`
/// and the handlers turn that into a 404.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A SQLite operation failed; the write was not committed.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Preparing the database location on disk failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias that pins the error type to [`StoreError`].
pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl ResponseError for StoreError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.to_string()))
    }
}
