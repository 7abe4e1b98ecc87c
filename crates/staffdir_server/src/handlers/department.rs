//! Department handlers.
//!
//! GET/POST /departments, GET/PUT/DELETE /departments/{id}

use super::run_blocking;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use log::info;
use staffdir_core::Department;

pub async fn list_departments(
    State(state): State<AppState>,
) -> Result<Json<Vec<Department>>, ApiError> {
    let service = state.departments;
    let departments = run_blocking(move || service.list_departments()).await?;
    Ok(Json(departments))
}

/// POST /departments
///
/// Replaces an existing department with the same id.
pub async fn create_department(
    State(state): State<AppState>,
    payload: Result<Json<Department>, JsonRejection>,
) -> Result<(StatusCode, Json<Department>), ApiError> {
    let Json(department) = payload?;

    let service = state.departments;
    let stored = department.clone();
    run_blocking(move || service.create_department(&stored)).await?;

    info!(
        "event=department_create module=server status=ok id={}",
        department.id
    );
    Ok((StatusCode::CREATED, Json(department)))
}

pub async fn get_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Department>, ApiError> {
    let service = state.departments;
    let department = run_blocking(move || service.get_department_by_id(&id)).await?;
    Ok(Json(department))
}

/// PUT /departments/{id}
///
/// Only `name` is applied; the stored record is returned.
pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Department>, JsonRejection>,
) -> Result<Json<Department>, ApiError> {
    let Json(patch) = payload?;

    let service = state.departments;
    let updated = run_blocking(move || service.update_department_by_id(&id, &patch)).await?;
    Ok(Json(updated))
}

pub async fn delete_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let service = state.departments;
    run_blocking(move || service.delete_department_by_id(&id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
