//! Error handling middleware - RFC 7807 compliant responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use pulse_core::ApiError;
use pulse_core::domain::UnknownVariant;
use pulse_core::views::FormError;
use pulse_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    /// Input rejected by the form or by the posts backend. `state` is what
    /// the client should re-render.
    Validation {
        detail: String,
        errors: Option<serde_json::Value>,
        state: Option<serde_json::Value>,
    },
    /// The posts backend failed or was unreachable.
    Upstream {
        detail: String,
        state: Option<serde_json::Value>,
    },
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Validation { detail, .. } => write!(f, "Validation failed: {}", detail),
            AppError::Upstream { detail, .. } => write!(f, "Upstream error: {}", detail),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Validation {
                detail,
                errors,
                state,
            } => {
                let mut error = ErrorResponse::unprocessable(detail);
                if let Some(errors) = errors {
                    error = error.with_errors(errors.clone());
                }
                if let Some(state) = state {
                    error = error.with_state(state.clone());
                }
                error
            }
            AppError::Upstream { detail, state } => {
                let error = ErrorResponse::bad_gateway(detail);
                match state {
                    Some(state) => error.with_state(state.clone()),
                    None => error,
                }
            }
            AppError::Internal(detail) => {
                // Log internal errors
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from domain errors
impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotFound => AppError::NotFound(err.user_message()),
            ApiError::Validation { ref details } => AppError::Validation {
                detail: err.user_message(),
                errors: Some(details.clone()),
                state: None,
            },
            ApiError::Transport(_) | ApiError::Http { .. } | ApiError::Decode(_) => {
                tracing::warn!(error = %err, "Posts backend call failed");
                AppError::Upstream {
                    detail: err.user_message(),
                    state: None,
                }
            }
        }
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::MissingField(_) | FormError::InvalidSchedule(_) => AppError::Validation {
                detail: err.to_string(),
                errors: None,
                state: None,
            },
            FormError::UnknownChoice(_) | FormError::UnknownField(_) | FormError::Closed => {
                AppError::BadRequest(err.to_string())
            }
        }
    }
}

impl From<UnknownVariant> for AppError {
    fn from(err: UnknownVariant) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
