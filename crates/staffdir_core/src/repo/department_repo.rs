//! Department bucket binding.
//!
//! # Invariants
//! - Records live in bucket `Departments`, keyed by department id.
//! - Update is partial: only `name` is taken from the patch.

use crate::model::department::Department;
use crate::repo::bucket_repo::{BucketEntity, BucketRepository, EntityRepository};

pub const DEPARTMENT_BUCKET: &str = "Departments";

impl BucketEntity for Department {
    const BUCKET: &'static str = DEPARTMENT_BUCKET;
    const KIND: &'static str = "department";

    fn id(&self) -> &str {
        &self.id
    }

    fn apply_patch(&mut self, patch: &Self) {
        self.name.clone_from(&patch.name);
    }
}

/// Repository capability for departments.
pub trait DepartmentRepository: EntityRepository<Department> {}

impl<T: EntityRepository<Department>> DepartmentRepository for T {}

/// Store-backed department repository.
pub type DepartmentBucketRepository = BucketRepository<Department>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_only_touches_name() {
        let mut stored = Department::new("d1", "Eng");
        stored.apply_patch(&Department::new("other", "Engineering"));
        assert_eq!(stored, Department::new("d1", "Engineering"));
    }
}
