//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Resource errors
    #[error("Record not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    // Validation
    #[error("{0}")]
    Validation(String),

    // Enrollment & marks business rules
    #[error("Student must complete current course before enrolling in another")]
    EnrollmentBlocked,

    #[error("Student \"{student}\" is not enrolled in the course that contains module \"{module}\"")]
    EnrollmentMissing { student: String, module: String },

    #[error(
        "Student \"{student}\" is enrolled in the course but not registered for module \"{module}\". \
         Please enroll the student in this module first."
    )]
    ModuleNotRegistered { student: String, module: String },

    #[error(
        "Cannot enter marks for module \"{module}\" because it is already marked as \"{status}\". \
         Delete the recorded marks before entering new ones."
    )]
    AlreadyFinalized { module: String, status: String },

    // External service errors
    #[error("Database error")]
    Database(#[from] DbErr),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

impl AppError {
    /// Get error code for client
    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::EnrollmentBlocked => "ENROLLMENT_BLOCKED",
            AppError::EnrollmentMissing { .. } => "ENROLLMENT_MISSING",
            AppError::ModuleNotRegistered { .. } => "MODULE_NOT_REGISTERED",
            AppError::AlreadyFinalized { .. } => "ALREADY_FINALIZED",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) | AppError::EnrollmentBlocked => StatusCode::CONFLICT,
            AppError::Validation(_)
            | AppError::EnrollmentMissing { .. }
            | AppError::ModuleNotRegistered { .. }
            | AppError::AlreadyFinalized { .. } => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the student is not eligible for marks entry on the module
    pub fn is_not_eligible(&self) -> bool {
        matches!(
            self,
            AppError::EnrollmentMissing { .. } | AppError::ModuleNotRegistered { .. }
        )
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Map a unique-key violation to `Conflict`, anything else to `Database`.
    pub fn from_insert(err: DbErr, conflict_msg: impl Into<String>) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(conflict_msg.into()),
            _ => AppError::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_business_rule_errors_name_the_rule() {
        let (status, body) = body_json(AppError::ModuleNotRegistered {
            student: "Amina Otieno".to_string(),
            module: "Electrical Wiring".to_string(),
        })
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "MODULE_NOT_REGISTERED");
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.contains("Amina Otieno"));
        assert!(message.contains("enroll the student in this module first"));
    }

    #[tokio::test]
    async fn test_database_errors_are_hidden() {
        let (status, body) =
            body_json(AppError::Database(DbErr::Custom("connection reset".into()))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "A database error occurred");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::EnrollmentBlocked.status(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::validation("bad").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::AlreadyFinalized {
                module: "Plumbing".into(),
                status: "Completed".into()
            }
            .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_eligible_class() {
        let missing = AppError::EnrollmentMissing {
            student: "s".into(),
            module: "m".into(),
        };
        assert!(missing.is_not_eligible());
        assert!(!AppError::EnrollmentBlocked.is_not_eligible());
    }

    #[test]
    fn test_ok_or_not_found() {
        let value: Option<i32> = None;
        assert!(matches!(value.ok_or_not_found(), Err(AppError::NotFound)));
    }
}
