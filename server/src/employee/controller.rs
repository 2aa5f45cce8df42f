//! HTTP handlers for `/employees`.
//!
//! Each request is parsed, handed to the use case once, and the outcome is
//! mapped to a status code and JSON body. Failures never escape as anything
//! but a `{"error": ...}` response.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::get,
};
use tracing::{debug, error, instrument};

use super::{
    id::parse_employee_id,
    model::Employee,
    repository::RepositoryError,
    usecase::DynEmployeeUseCase,
};
use crate::http::{HttpError, HttpResult};

pub const INVALID_ID: &str = "Invalid employee ID";
pub const INVALID_INPUT: &str = "Invalid input data";
pub const EMPLOYEE_NOT_FOUND: &str = "Employee not found";
pub const FETCH_ALL_FAILED: &str = "Failed to fetch employees";
pub const FETCH_ONE_FAILED: &str = "Failed to fetch employee";
pub const CREATE_FAILED: &str = "Failed to create employee";
pub const UPDATE_FAILED: &str = "Failed to update employee";
pub const DELETE_FAILED: &str = "Failed to delete employee";

/// Employee routes for any state that can hand out the use case.
pub fn routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    DynEmployeeUseCase: FromRef<S>,
{
    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route("/employees/", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}

#[instrument(name = "employees.list", skip_all)]
async fn list_employees(
    State(use_case): State<DynEmployeeUseCase>,
) -> HttpResult<Json<Vec<Employee>>> {
    let employees = use_case
        .get_employees()
        .await
        .map_err(|err| storage_failure(err, FETCH_ALL_FAILED))?;
    Ok(Json(employees))
}

#[instrument(name = "employees.get", skip_all, fields(id = %raw_id))]
async fn get_employee(
    State(use_case): State<DynEmployeeUseCase>,
    Path(raw_id): Path<String>,
) -> HttpResult<Json<Employee>> {
    let id = path_id(&raw_id)?;
    match use_case.get_employee_by_id(id).await {
        Ok(employee) => Ok(Json(employee)),
        Err(RepositoryError::NotFound(_)) => {
            Err(HttpError::new(StatusCode::NOT_FOUND, EMPLOYEE_NOT_FOUND))
        }
        Err(err) => Err(storage_failure(err, FETCH_ONE_FAILED)),
    }
}

#[instrument(name = "employees.create", skip_all)]
async fn create_employee(
    State(use_case): State<DynEmployeeUseCase>,
    body: Bytes,
) -> HttpResult<(StatusCode, Json<Employee>)> {
    let employee = Employee {
        id: 0,
        ..decode_body(&body)?
    };
    let created = use_case
        .create_employee(employee)
        .await
        .map_err(|err| storage_failure(err, CREATE_FAILED))?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(name = "employees.update", skip_all, fields(id = %raw_id))]
async fn update_employee(
    State(use_case): State<DynEmployeeUseCase>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> HttpResult<Json<Employee>> {
    let id = path_id(&raw_id)?;
    let employee = Employee {
        id,
        ..decode_body(&body)?
    };
    let updated = use_case
        .update_employee(employee)
        .await
        .map_err(|err| storage_failure(err, UPDATE_FAILED))?;
    Ok(Json(updated))
}

#[instrument(name = "employees.delete", skip_all, fields(id = %raw_id))]
async fn delete_employee(
    State(use_case): State<DynEmployeeUseCase>,
    Path(raw_id): Path<String>,
) -> HttpResult<StatusCode> {
    let id = path_id(&raw_id)?;
    use_case
        .delete_employee(id)
        .await
        .map_err(|err| storage_failure(err, DELETE_FAILED))?;
    Ok(StatusCode::NO_CONTENT)
}

fn path_id(raw: &str) -> HttpResult<u64> {
    parse_employee_id(raw).map_err(|err| {
        debug!(error = %err, "rejected employee id");
        HttpError::new(StatusCode::BAD_REQUEST, INVALID_ID)
    })
}

// The content type is not checked. Anything other than a JSON object is
// rejected by `Employee`'s decoder.
fn decode_body(body: &[u8]) -> HttpResult<Employee> {
    serde_json::from_slice(body).map_err(|err| {
        debug!(error = %err, "rejected employee payload");
        HttpError::new(StatusCode::BAD_REQUEST, INVALID_INPUT)
    })
}

fn storage_failure(err: RepositoryError, message: &'static str) -> HttpError {
    error!(error = %err, "{message}");
    HttpError::new(StatusCode::INTERNAL_SERVER_ERROR, message)
}
