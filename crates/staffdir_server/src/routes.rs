//! Route table.

use crate::handlers::{department, employee, health};
use crate::middleware::access_log;
use crate::state::AppState;
use axum::routing::get;
use axum::{middleware, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/departments",
            get(department::list_departments).post(department::create_department),
        )
        .route(
            "/departments/{id}",
            get(department::get_department)
                .put(department::update_department)
                .delete(department::delete_department),
        )
        .route(
            "/employees",
            get(employee::list_employees).post(employee::create_employee),
        )
        .route(
            "/employees/{id}",
            get(employee::get_employee)
                .put(employee::update_employee)
                .delete(employee::delete_employee),
        )
        .route(
            "/employees/department/{dept_id}",
            get(employee::list_employees_by_department),
        )
        .layer(middleware::from_fn(access_log))
        .with_state(state)
}
