//! Employee use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD and by-department entry points.
//! - Delegate persistence to an [`EmployeeRepository`].
//!
//! # Invariants
//! - Repository errors are returned unchanged.
//! - Department references are passed through without validation.

use crate::model::employee::Employee;
use crate::repo::bucket_repo::RepoResult;
use crate::repo::employee_repo::EmployeeRepository;

/// Use-case service wrapper for employee operations.
pub struct EmployeeService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> EmployeeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stores an employee, replacing any record with the same id.
    pub fn create_employee(&self, employee: &Employee) -> RepoResult<()> {
        self.repo.create(employee)
    }

    pub fn list_employees(&self) -> RepoResult<Vec<Employee>> {
        self.repo.list()
    }

    pub fn get_employee_by_id(&self, id: &str) -> RepoResult<Employee> {
        self.repo.get_by_id(id)
    }

    /// Replaces name, position and department of the stored employee.
    pub fn update_employee_by_id(&self, id: &str, patch: &Employee) -> RepoResult<Employee> {
        self.repo.update_by_id(id, patch)
    }

    pub fn delete_employee_by_id(&self, id: &str) -> RepoResult<()> {
        self.repo.delete_by_id(id)
    }

    pub fn list_employees_by_department(&self, department_id: &str) -> RepoResult<Vec<Employee>> {
        self.repo.list_by_department(department_id)
    }
}
