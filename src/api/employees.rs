//! Employee API endpoints.

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
};

use super::{parse_body, ApiResponse, ApiResult};
use crate::db::Lookup;
use crate::errors::{AppError, AppErrorWithMessage, ListingError};
use crate::validation::{email_of, regid_of, validate_employee, validate_fields, RegidArg};
use crate::AppState;

const CREATED: &str = "Employee created successfully";
const UPDATED: &str = "Employee details updated successfully";
const UPDATE_FAILED: &str = "Employee updation failed";
const DELETED: &str = "Employee deleted successfully";
const DELETE_FAILED: &str = "Employee deletion failed";
const NO_EMPLOYEE: &str = "No employee found with this regid";
const DETAILS_FOUND: &str = "Employee details found";
const DETAILS_NOT_FOUND: &str = "Employee details not found";
const RETRIEVE_FAILED: &str = "Employee retrieval failed";

/// POST /create_employee - Create a new employee.
pub async fn create_employee(State(state): State<AppState>, body: Bytes) -> ApiResult<AppError> {
    let payload = parse_body(&body)?;

    // Duplicate email is reported ahead of any shape error.
    if let Some(email) = email_of(&payload) {
        if state.repo.email_exists(email).await? {
            tracing::warn!("Rejected employee create: duplicate email");
            return Err(AppError::DuplicateEmail);
        }
    }

    let record = validate_employee(&payload).inspect_err(|e| {
        tracing::warn!("Rejected employee create: {}", e);
    })?;

    let regid = state.repo.create(&record).await?;
    tracing::info!(regid, "Employee created");

    Ok(ApiResponse::created(CREATED))
}

/// PUT /update/{regid}/ - Replace every field of an employee.
///
/// Only field presence and shape are checked; email uniqueness is not.
pub async fn update_employee(
    State(state): State<AppState>,
    regid: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> ApiResult<AppErrorWithMessage> {
    let Path(regid) = regid.map_err(|rejection| {
        tracing::warn!("Rejected employee update: {}", rejection.body_text());
        AppError::BadRequest(rejection.body_text()).with_message(UPDATE_FAILED)
    })?;

    if let Lookup::NotFound = state
        .repo
        .get(regid)
        .await
        .map_err(|e| e.with_message(UPDATE_FAILED))?
    {
        return Ok(ApiResponse::not_found(NO_EMPLOYEE));
    }

    let record = parse_body(&body)
        .and_then(|payload| validate_fields(&payload).map_err(AppError::from))
        .map_err(|e| {
            tracing::warn!(regid, "Rejected employee update: {}", e);
            e.with_message(UPDATE_FAILED)
        })?;

    match state.repo.save(regid, &record).await {
        Ok(Lookup::Found(())) => {
            tracing::info!(regid, "Employee updated");
            Ok(ApiResponse::success(UPDATED))
        }
        // Deleted between the lookup and the write.
        Ok(Lookup::NotFound) => Ok(ApiResponse::not_found(NO_EMPLOYEE)),
        Err(e) => Err(e.with_message(UPDATE_FAILED)),
    }
}

/// DELETE /delete/ - Delete the employee named by `regid` in the body.
pub async fn delete_employee(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<AppErrorWithMessage> {
    let payload = parse_body(&body).map_err(|e| e.with_message(DELETE_FAILED))?;

    let regid = match regid_of(&payload) {
        RegidArg::Id(regid) => regid,
        // A blank regid names no employee.
        RegidArg::Blank => return Ok(ApiResponse::not_found(NO_EMPLOYEE)),
        RegidArg::Missing | RegidArg::Malformed => {
            tracing::warn!("Rejected employee delete: missing or malformed regid");
            return Err(AppError::BadRequest("regid is required".to_string())
                .with_message(DELETE_FAILED));
        }
    };

    match state.repo.delete(regid).await {
        Ok(Lookup::Found(())) => {
            tracing::info!(regid, "Employee deleted");
            Ok(ApiResponse::success(DELETED))
        }
        Ok(Lookup::NotFound) => Ok(ApiResponse::not_found(NO_EMPLOYEE)),
        Err(e) => Err(e.with_message(DELETE_FAILED)),
    }
}

/// GET /get/ - One employee when the body names a `regid`, otherwise all of them.
pub async fn get_employees(State(state): State<AppState>, body: Bytes) -> ApiResult<ListingError> {
    let failed = |e: AppError| ListingError(e.with_message(RETRIEVE_FAILED));

    let payload = parse_body(&body).map_err(failed)?;

    match regid_of(&payload) {
        RegidArg::Missing | RegidArg::Blank => {
            let employees = state.repo.list_all().await.map_err(failed)?;
            Ok(ApiResponse::success(DETAILS_FOUND).with_employees(employees))
        }
        RegidArg::Id(regid) => match state.repo.get(regid).await.map_err(failed)? {
            Lookup::Found(employee) => {
                Ok(ApiResponse::success(DETAILS_FOUND).with_employees(vec![employee]))
            }
            Lookup::NotFound => {
                Ok(ApiResponse::not_found(DETAILS_NOT_FOUND).with_employees(Vec::new()))
            }
        },
        RegidArg::Malformed => {
            Ok(ApiResponse::not_found(DETAILS_NOT_FOUND).with_employees(Vec::new()))
        }
    }
}
