use axum::{
    extract::rejection::{BytesRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

use crate::users::repo::RepoError;

/// Coarse classification of an application failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
    Decode,
}

/// Error returned by the service layer. The kind survives up to the
/// handlers, which pick the HTTP status from it.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("user with ID {id} not found")]
    NotFound { id: i64 },

    #[error("{context}: {source}")]
    Storage {
        context: String,
        #[source]
        source: RepoError,
    },

    #[error("{0}")]
    Decode(String),
}

impl AppError {
    pub fn storage(context: impl Into<String>, source: RepoError) -> Self {
        Self::Storage {
            context: context.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::Storage { .. } => ErrorKind::Storage,
            AppError::Decode(_) => ErrorKind::Decode,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation | ErrorKind::Decode => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Storage => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Flattens into a client-facing error. Storage failures are logged with
    /// their cause and replaced by `public`; other kinds keep their message.
    pub fn into_api(self, public: impl Into<String>) -> ApiError {
        let status = self.status_code();
        let message = match self.kind() {
            ErrorKind::Storage => {
                error!(error = %self, "storage failure");
                public.into()
            }
            _ => {
                warn!(error = %self, %status, "request rejected");
                self.to_string()
            }
        };
        ApiError { status, message }
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        warn!(error = %rejection.body_text(), "request body rejected");
        AppError::Decode("Failed to read JSON".into())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        warn!(error = %err, "json body rejected");
        AppError::Decode("Failed to read JSON".into())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        warn!(error = %rejection.body_text(), "path rejected");
        AppError::Decode("invalid user id".into())
    }
}

/// Error response written as a bare `{"error": "..."}` object.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: &self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        let public = err.to_string();
        err.into_api(public)
    }
}
