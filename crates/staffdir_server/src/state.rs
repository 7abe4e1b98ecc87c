//! Shared handler state.

use staffdir_core::{
    DepartmentBucketRepository, DepartmentService, EmployeeBucketRepository, EmployeeService,
    Store,
};
use std::sync::Arc;

pub type Departments = DepartmentService<DepartmentBucketRepository>;
pub type Employees = EmployeeService<EmployeeBucketRepository>;

/// Services wired to one store handle owned by the process root.
#[derive(Clone)]
pub struct AppState {
    pub departments: Arc<Departments>,
    pub employees: Arc<Employees>,
}

impl AppState {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            departments: Arc::new(DepartmentService::new(DepartmentBucketRepository::new(
                Arc::clone(&store),
            ))),
            employees: Arc::new(EmployeeService::new(EmployeeBucketRepository::new(store))),
        }
    }
}
