//! Employee handlers.
//!
//! GET/POST /employees, GET/PUT/DELETE /employees/{id},
//! GET /employees/department/{dept_id}

use super::run_blocking;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use log::info;
use staffdir_core::Employee;

pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let service = state.employees;
    let employees = run_blocking(move || service.list_employees()).await?;
    Ok(Json(employees))
}

/// POST /employees
///
/// The department reference is stored as given, without checking it exists.
pub async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    let Json(employee) = payload?;

    let service = state.employees;
    let stored = employee.clone();
    run_blocking(move || service.create_employee(&stored)).await?;

    info!(
        "event=employee_create module=server status=ok id={}",
        employee.id
    );
    Ok((StatusCode::CREATED, Json(employee)))
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, ApiError> {
    let service = state.employees;
    let employee = run_blocking(move || service.get_employee_by_id(&id)).await?;
    Ok(Json(employee))
}

pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> Result<Json<Employee>, ApiError> {
    let Json(patch) = payload?;

    let service = state.employees;
    let updated = run_blocking(move || service.update_employee_by_id(&id, &patch)).await?;
    Ok(Json(updated))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let service = state.employees;
    run_blocking(move || service.delete_employee_by_id(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /employees/department/{dept_id}
///
/// An unknown department yields an empty array, not 404.
pub async fn list_employees_by_department(
    State(state): State<AppState>,
    Path(dept_id): Path<String>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    let service = state.employees;
    let employees =
        run_blocking(move || service.list_employees_by_department(&dept_id)).await?;
    Ok(Json(employees))
}
