use aidar_assignments::error::AssignmentError;
use aidar_builder::error::BuilderError;
use aidar_core::store_keys;
use aidar_forms::ResponseErrors;
use aidar_storage::error::StorageError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    /// Input that parsed but failed validation. Carries per-question
    /// messages when the failure came from response validation.
    Unprocessable {
        message: String,
        errors: Option<ResponseErrors>,
    },
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<ResponseErrors>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg, None),
            ApiError::Unprocessable { message, errors } => {
                (StatusCode::UNPROCESSABLE_ENTITY, message, errors)
            }
            ApiError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorBody { message, errors })).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::NotFound { key } => match store_keys::parse(&key) {
                Ok((kind, _)) => ApiError::NotFound(format!("{} not found", kind.name())),
                Err(_) => ApiError::NotFound(format!("object not found: {key}")),
            },
            StorageError::Duplicate { .. } => ApiError::Conflict(e.to_string()),
            StorageError::InvalidPatch(msg) => ApiError::BadRequest(msg),
            StorageError::Serialization(e) => ApiError::BadRequest(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<BuilderError> for ApiError {
    fn from(e: BuilderError) -> Self {
        match e {
            BuilderError::Storage(e) => e.into(),
            BuilderError::ValidationFailed(message) => ApiError::Unprocessable {
                message,
                errors: None,
            },
            BuilderError::HasCompletedAssignments { .. } => ApiError::Conflict(e.to_string()),
            BuilderError::Serialization(e) => ApiError::Internal(e.to_string()),
            other => ApiError::BadRequest(other.to_string()),
        }
    }
}

impl From<AssignmentError> for ApiError {
    fn from(e: AssignmentError) -> Self {
        match e {
            AssignmentError::Storage(e) => e.into(),
            AssignmentError::Validation(errors) => ApiError::Unprocessable {
                message: errors.to_string(),
                errors: Some(errors),
            },
            AssignmentError::AlreadyCompleted
            | AssignmentError::Locked(_)
            | AssignmentError::ProtectedField(_) => ApiError::Conflict(e.to_string()),
            AssignmentError::SurveyMismatch { .. } => ApiError::BadRequest(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
