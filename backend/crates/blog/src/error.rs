//! Blog Error Types
//!
//! Blog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

#[derive(Debug, Error)]
pub enum BlogError {
    /// No matching row, or a row the caller may not see
    #[error("Not found")]
    NotFound,

    /// Anonymous caller, or caller is not the owner
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::NotFound => ErrorKind::NotFound,
            BlogError::Unauthorized => ErrorKind::Unauthorized,
            BlogError::BadRequest(_) => ErrorKind::BadRequest,
            BlogError::Database(_) | BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError. Server-side details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        let kind = self.kind();
        if kind.is_server_error() {
            AppError::internal("Internal server error")
        } else {
            AppError::new(kind, self.to_string())
        }
    }

    fn log(&self) {
        match self {
            BlogError::Database(e) => {
                tracing::error!(error = %e, "Blog database error");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Blog error");
            }
        }
    }
}

/// "No rows" becomes `NotFound` here and nowhere else
impl From<sqlx::Error> for BlogError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => BlogError::NotFound,
            other => BlogError::Database(other),
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JsonRejection> for BlogError {
    fn from(rejection: JsonRejection) -> Self {
        BlogError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for BlogError {
    fn from(rejection: QueryRejection) -> Self {
        BlogError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for BlogError {
    fn from(rejection: PathRejection) -> Self {
        BlogError::BadRequest(rejection.body_text())
    }
}
