//! Error handling module for the employee records backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and the two
//! response envelopes used by the API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::validation::ValidationError;

/// Message returned for every client error on the `{message, success}` endpoints.
pub const INVALID_BODY_REQUEST: &str = "Invalid body request";

/// Application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Payload failed schema validation
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Another employee already uses this email
    #[error("Duplicate email")]
    DuplicateEmail,
    /// Body could not be interpreted
    #[error("{0}")]
    BadRequest(String),
    /// Database error
    #[error("{0}")]
    Database(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateEmail => StatusCode::BAD_REQUEST,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Attach the generic failure message of the endpoint that produced this error.
    pub fn with_message(self, failure_message: &'static str) -> AppErrorWithMessage {
        AppErrorWithMessage {
            error: self,
            failure_message,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        AppError::Database(format!("Database error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::warn!("JSON error: {:?}", err);
        AppError::BadRequest(format!("Malformed JSON body: {}", err))
    }
}

/// Error envelope of the create endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        // Server-side causes stay in the logs.
        let error = if self.is_client_error() {
            self.to_string()
        } else {
            "Employee creation failed".to_string()
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

/// Error envelope of the update, delete and retrieve endpoints.
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    pub message: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<Vec<serde_json::Value>>,
}

/// Wrapper type for errors that carry the endpoint's failure message.
#[derive(Debug)]
pub struct AppErrorWithMessage {
    pub error: AppError,
    pub failure_message: &'static str,
}

impl AppErrorWithMessage {
    fn body(&self) -> FailureResponse {
        let message = if self.error.is_client_error() {
            INVALID_BODY_REQUEST
        } else {
            self.failure_message
        };
        FailureResponse {
            message: message.to_string(),
            success: false,
            employees: None,
        }
    }
}

impl IntoResponse for AppErrorWithMessage {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        (status, Json(self.body())).into_response()
    }
}

/// Retrieval failures still carry an (empty) employee list.
pub struct ListingError(pub AppErrorWithMessage);

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        let status = self.0.error.status_code();
        let mut body = self.0.body();
        body.employees = Some(Vec::new());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_map_to_bad_request() {
        assert_eq!(AppError::DuplicateEmail.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::from(ValidationError::AddressDetailsKeys).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Database("disk full".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_failure_body_hides_server_cause() {
        let wrapped =
            AppError::Database("disk full".to_string()).with_message("Employee deletion failed");
        let body = wrapped.body();
        assert_eq!(body.message, "Employee deletion failed");
        assert!(!body.success);

        let wrapped = AppError::DuplicateEmail.with_message("Employee updation failed");
        assert_eq!(wrapped.body().message, INVALID_BODY_REQUEST);
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = AppError::from(ValidationError::MissingOrMistyped { key: "age" });
        assert_eq!(err.to_string(), "Missing or incorrect data type for key: age");
    }
}
