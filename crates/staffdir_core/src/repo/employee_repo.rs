//! Employee bucket binding and per-department index.
//!
//! # Responsibility
//! - Bind employees to bucket `Employees` with full-overwrite updates.
//! - Maintain and query the per-department index buckets.
//!
//! # Invariants
//! - Every stored employee is mirrored under its id in exactly one index
//!   bucket, `Department_<department id>`, written in the same transaction.
//! - Index bucket names never collide with primary bucket names.

use crate::model::employee::Employee;
use crate::repo::bucket_repo::{
    scan_bucket, BucketEntity, BucketRepository, EntityRepository, RepoResult,
};
use log::debug;

pub const EMPLOYEE_BUCKET: &str = "Employees";

const DEPARTMENT_INDEX_PREFIX: &str = "Department_";

/// Name of the bucket indexing employees of `department_id`.
pub fn department_bucket_name(department_id: &str) -> String {
    format!("{DEPARTMENT_INDEX_PREFIX}{department_id}")
}

impl BucketEntity for Employee {
    const BUCKET: &'static str = EMPLOYEE_BUCKET;
    const KIND: &'static str = "employee";
    const INDEX_PREFIX: Option<&'static str> = Some(DEPARTMENT_INDEX_PREFIX);

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: &Self) {
        self.name.clone_from(&patch.name);
        self.position.clone_from(&patch.position);
        self.department_id.clone_from(&patch.department_id);
    }

    fn index_bucket(&self) -> Option<String> {
        Some(department_bucket_name(&self.department_id))
    }
}

/// Repository capability for employees.
pub trait EmployeeRepository: EntityRepository<Employee> {
    /// Lists employees indexed under `department_id`, in employee-id order.
    ///
    /// Returns an empty list when the department has no index bucket.
    fn list_by_department(&self, department_id: &str) -> RepoResult<Vec<Employee>>;
}

/// Store-backed employee repository.
pub type EmployeeBucketRepository = BucketRepository<Employee>;

impl EmployeeRepository for BucketRepository<Employee> {
    fn list_by_department(&self, department_id: &str) -> RepoResult<Vec<Employee>> {
        let bucket_name = department_bucket_name(department_id);
        let employees = self
            .store()
            .view(|tx| scan_bucket::<Employee>(tx, &bucket_name))?;
        debug!(
            "event=repo_list_by_department module=repo status=ok entity=employee count={}",
            employees.len()
        );
        Ok(employees)
    }
}
