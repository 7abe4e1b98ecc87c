//! Department use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for transport layers.
//! - Delegate persistence to a [`DepartmentRepository`].
//!
//! # Invariants
//! - Repository errors are returned unchanged.
//! - Service layer remains storage-agnostic.

use crate::model::department::Department;
use crate::repo::bucket_repo::RepoResult;
use crate::repo::department_repo::DepartmentRepository;

/// Use-case service wrapper for department CRUD operations.
pub struct DepartmentService<R: DepartmentRepository> {
    repo: R,
}

impl<R: DepartmentRepository> DepartmentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Stores a department, replacing any record with the same id.
    pub fn create_department(&self, department: &Department) -> RepoResult<()> {
        self.repo.create(department)
    }

    pub fn list_departments(&self) -> RepoResult<Vec<Department>> {
        self.repo.list()
    }

    pub fn get_department_by_id(&self, id: &str) -> RepoResult<Department> {
        self.repo.get_by_id(id)
    }

    /// Renames a department; other fields of `patch` are ignored.
    pub fn update_department_by_id(&self, id: &str, patch: &Department) -> RepoResult<Department> {
        self.repo.update_by_id(id, patch)
    }

    pub fn delete_department_by_id(&self, id: &str) -> RepoResult<()> {
        self.repo.delete_by_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::DepartmentService;
    use crate::model::department::Department;
    use crate::repo::bucket_repo::{EntityRepository, RepoError, RepoResult};
    use std::cell::RefCell;
    use std::collections::BTreeMap;

    /// Map-backed stand-in proving the service only needs the capability.
    #[derive(Default)]
    struct MapRepository {
        rows: RefCell<BTreeMap<String, Department>>,
    }

    impl EntityRepository<Department> for MapRepository {
        fn create(&self, entity: &Department) -> RepoResult<()> {
            self.rows
                .borrow_mut()
                .insert(entity.id.clone(), entity.clone());
            Ok(())
        }

        fn list(&self) -> RepoResult<Vec<Department>> {
            Ok(self.rows.borrow().values().cloned().collect())
        }

        fn get_by_id(&self, id: &str) -> RepoResult<Department> {
            self.rows.borrow().get(id).cloned().ok_or(RepoError::NotFound {
                entity: "department",
                id: id.to_owned(),
            })
        }

        fn update_by_id(&self, id: &str, patch: &Department) -> RepoResult<Department> {
            let mut rows = self.rows.borrow_mut();
            let stored = rows.get_mut(id).ok_or(RepoError::NotFound {
                entity: "department",
                id: id.to_owned(),
            })?;
            stored.name.clone_from(&patch.name);
            Ok(stored.clone())
        }

        fn delete_by_id(&self, id: &str) -> RepoResult<()> {
            self.rows
                .borrow_mut()
                .remove(id)
                .map(|_| ())
                .ok_or(RepoError::NotFound {
                    entity: "department",
                    id: id.to_owned(),
                })
        }
    }

    #[test]
    fn service_delegates_to_any_repository() {
        let service = DepartmentService::new(MapRepository::default());
        service
            .create_department(&Department::new("d1", "Eng"))
            .unwrap();

        let renamed = service
            .update_department_by_id("d1", &Department::new("x", "Engineering"))
            .unwrap();
        assert_eq!(renamed, Department::new("d1", "Engineering"));
        assert_eq!(service.list_departments().unwrap(), vec![renamed]);

        service.delete_department_by_id("d1").unwrap();
        let err = service.get_department_by_id("d1").unwrap_err();
        assert!(err.is_not_found());
    }
}
