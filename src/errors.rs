//! # Error Handling
//!
//! Every handler failure becomes an [`ApiError`], which:
//! - picks the HTTP status code
//! - sends a sanitized, user-facing message
//! - logs internal details through `tracing`
//!
//! Database errors, SQL text and connection strings are never sent to
//! visitors.
//!
//! Listing endpoints are the one exception to the `{ "error": ... }` body:
//! when the data store fails they answer with [`ListingError::Unavailable`],
//! which renders a zeroed listing envelope so the page can still draw an
//! empty table.
//!
//! ```rust,ignore
//! async fn handler(State(state): State<AppState>) -> Result<Json<Data>, ApiError> {
//!     let rows = Entity::find().all(&state.db).await.map_err(ApiError::database)?;
//!     Ok(Json(rows.into()))
//! }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use std::fmt;

use crate::models::ListResponse;
use crate::validation::ValidationErrors;

/// API error type with automatic logging and sanitized responses
#[derive(Debug)]
pub enum ApiError {
    /// 400 Bad Request - Invalid input from user
    BadRequest {
        /// User-facing error message
        message: String,
    },

    /// 409 Conflict - e.g. an email that is already subscribed
    Conflict {
        /// User-facing error message
        message: String,
    },

    /// 422 Unprocessable Entity - Validation failed
    ValidationFailed {
        /// User-facing validation errors
        errors: Vec<String>,
    },

    /// 500 Internal Server Error - Database error (details logged, not exposed)
    Database {
        /// User-facing generic message
        message: String,
        /// Internal error (logged, not sent to user)
        internal: DbErr,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn validation_failed(errors: Vec<String>) -> Self {
        Self::ValidationFailed { errors }
    }

    /// Create a 500 from a database error. The details are logged, not sent.
    ///
    /// ```rust,ignore
    /// let tip = active_model.insert(db).await.map_err(ApiError::database)?;
    /// ```
    #[must_use]
    pub fn database(err: DbErr) -> Self {
        Self::Database {
            message: "A database error occurred".to_string(),
            internal: err,
        }
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::ValidationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the user-facing error message (sanitized)
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::ValidationFailed { errors } => {
                if errors.len() == 1 {
                    errors[0].clone()
                } else {
                    format!("Validation failed: {}", errors.join(", "))
                }
            }
            Self::BadRequest { message }
            | Self::Conflict { message }
            | Self::Database { message, .. } => message.clone(),
        }
    }

    /// Log internal error details (not sent to user)
    fn log_internal(&self) {
        match self {
            Self::Database { internal, .. } => {
                tracing::error!(error = ?internal, "Database error occurred");
            }
            _ => {
                tracing::debug!(
                    error = %self.user_message(),
                    status = %self.status_code(),
                    "API error"
                );
            }
        }
    }
}

/// Error response sent to users (sanitized)
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log_internal();

        let status = self.status_code();
        let response = match &self {
            Self::ValidationFailed { errors } => ErrorResponse {
                error: "Validation failed".to_string(),
                details: Some(errors.clone()),
            },
            _ => ErrorResponse {
                error: self.user_message(),
                details: None,
            },
        };

        (status, Json(response)).into_response()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for ApiError {}

/// Convert `DbErr` to `ApiError`.
///
/// - unique constraint violations become 409 Conflict
/// - all other variants become 500 (logged internally, sanitized for users)
impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Self::Conflict {
                message: "Duplicate entry".to_string(),
            },
            _ => Self::database(err),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        Self::validation_failed(errors.errors().iter().map(ToString::to_string).collect())
    }
}

/// Failure of a listing endpoint.
#[derive(Debug)]
pub enum ListingError {
    /// The request itself was bad (e.g. unknown sort key).
    Rejected(ApiError),
    /// The data store failed. Rendered as a 500 with a zeroed envelope.
    Unavailable {
        resource: &'static str,
        internal: DbErr,
    },
}

impl ListingError {
    #[must_use]
    pub fn unavailable(resource: &'static str, internal: DbErr) -> Self {
        Self::Unavailable { resource, internal }
    }
}

impl From<ApiError> for ListingError {
    fn from(err: ApiError) -> Self {
        Self::Rejected(err)
    }
}

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        match self {
            Self::Rejected(err) => err.into_response(),
            Self::Unavailable { resource, internal } => {
                tracing::error!(resource, error = ?internal, "Listing query failed");
                let body = ListResponse::<serde_json::Value>::fallback(format!(
                    "Failed to fetch {resource}"
                ));
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
