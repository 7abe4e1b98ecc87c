//! Core data access for the staff directory.
//! Departments and employees are stored as JSON values in named buckets of an
//! embedded key-value store.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use db::{DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::department::Department;
pub use model::employee::Employee;
pub use model::{validate_id, ValidationError, MAX_KEY_SIZE};
pub use repo::bucket_repo::{
    BucketEntity, BucketRepository, EntityRepository, RepoError, RepoResult,
};
pub use repo::department_repo::{
    DepartmentBucketRepository, DepartmentRepository, DEPARTMENT_BUCKET,
};
pub use repo::employee_repo::{
    department_bucket_name, EmployeeBucketRepository, EmployeeRepository, EMPLOYEE_BUCKET,
};
pub use service::department_service::DepartmentService;
pub use service::employee_service::EmployeeService;
pub use store::Store;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
