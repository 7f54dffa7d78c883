//! REST API module.
//!
//! Contains the employee routes and the response envelope they share.

mod employees;

pub use employees::*;

use axum::{
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::models::EmployeeDetails;
use crate::validation::ValidationError;

/// Success response envelope.
///
/// Not-found outcomes also use this envelope: they are answered with 200 and
/// `success: false`, never as HTTP errors.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    #[serde(skip)]
    pub status: StatusCode,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<Vec<EmployeeDetails>>,
}

impl ApiResponse {
    /// 201 with a bare message.
    pub fn created(message: &'static str) -> Self {
        Self {
            status: StatusCode::CREATED,
            message,
            success: None,
            employees: None,
        }
    }

    pub fn success(message: &'static str) -> Self {
        Self {
            status: StatusCode::OK,
            message,
            success: Some(true),
            employees: None,
        }
    }

    pub fn not_found(message: &'static str) -> Self {
        Self {
            status: StatusCode::OK,
            message,
            success: Some(false),
            employees: None,
        }
    }

    pub fn with_employees(mut self, employees: Vec<EmployeeDetails>) -> Self {
        self.employees = Some(employees);
        self
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

/// Response type that can be either success or the given error envelope.
pub type ApiResult<E> = Result<ApiResponse, E>;

/// Parse a request body as a JSON object, whatever its Content-Type.
///
/// An empty body reads as `{}` so GET and DELETE requests may omit it.
pub fn parse_body(body: &Bytes) -> Result<Value, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    let value: Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(ValidationError::NotAnObject.into());
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_body_empty_is_object() {
        assert_eq!(parse_body(&Bytes::new()).unwrap(), Value::Object(Map::new()));
        assert_eq!(
            parse_body(&Bytes::from_static(b"  \n")).unwrap(),
            Value::Object(Map::new())
        );
    }

    #[test]
    fn test_parse_body_rejects_malformed_and_non_objects() {
        let malformed = parse_body(&Bytes::from_static(b"{\"regid\": ")).unwrap_err();
        assert!(matches!(malformed, AppError::BadRequest(_)));

        let list = parse_body(&Bytes::from_static(b"[1, 2]")).unwrap_err();
        assert!(matches!(
            list,
            AppError::Validation(ValidationError::NotAnObject)
        ));
    }

    #[test]
    fn test_envelope_shapes() {
        let created = serde_json::to_value(ApiResponse::created("made")).unwrap();
        assert_eq!(created, serde_json::json!({ "message": "made" }));

        let missing =
            serde_json::to_value(ApiResponse::not_found("gone").with_employees(vec![])).unwrap();
        assert_eq!(
            missing,
            serde_json::json!({ "message": "gone", "success": false, "employees": [] })
        );
    }
}
