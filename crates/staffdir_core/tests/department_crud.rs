use staffdir_core::{
    Department, DepartmentBucketRepository, DepartmentService, DbResult, EntityRepository,
    RepoError, Store, ValidationError, DEPARTMENT_BUCKET,
};
use std::sync::Arc;

fn repo() -> DepartmentBucketRepository {
    DepartmentBucketRepository::new(Arc::new(Store::open_in_memory().unwrap()))
}

#[test]
fn create_and_get_roundtrip() {
    let repo = repo();

    let department = Department::new("d1", "Eng");
    repo.create(&department).unwrap();

    assert_eq!(repo.get_by_id("d1").unwrap(), department);
}

#[test]
fn list_on_never_written_collection_is_empty() {
    let repo = repo();
    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn list_returns_records_in_key_order() {
    let repo = repo();
    repo.create(&Department::new("d2", "Ops")).unwrap();
    repo.create(&Department::new("d1", "Eng")).unwrap();
    repo.create(&Department::new("d10", "Legal")).unwrap();

    let ids: Vec<_> = repo.list().unwrap().into_iter().map(|d| d.id).collect();
    assert_eq!(ids, ["d1", "d10", "d2"]);
}

#[test]
fn create_with_existing_id_overwrites() {
    let repo = repo();
    repo.create(&Department::new("d1", "Eng")).unwrap();
    repo.create(&Department::new("d1", "Engineering")).unwrap();

    assert_eq!(repo.list().unwrap(), vec![Department::new("d1", "Engineering")]);
}

#[test]
fn update_changes_only_name() {
    let repo = repo();
    repo.create(&Department::new("d1", "Eng")).unwrap();

    let updated = repo
        .update_by_id("d1", &Department::new("ignored", "Engineering"))
        .unwrap();

    assert_eq!(updated, Department::new("d1", "Engineering"));
    assert_eq!(repo.get_by_id("d1").unwrap(), updated);
    assert!(matches!(
        repo.get_by_id("ignored"),
        Err(RepoError::NotFound { .. })
    ));
}

#[test]
fn missing_bucket_and_missing_key_are_both_not_found() {
    let repo = repo();

    for result in [
        repo.get_by_id("d1").map(|_| ()),
        repo.update_by_id("d1", &Department::new("d1", "x")).map(|_| ()),
        repo.delete_by_id("d1"),
    ] {
        assert!(matches!(result, Err(RepoError::NotFound { entity: "department", .. })));
    }

    repo.create(&Department::new("d2", "Ops")).unwrap();
    for result in [
        repo.get_by_id("d1").map(|_| ()),
        repo.update_by_id("d1", &Department::new("d1", "x")).map(|_| ()),
        repo.delete_by_id("d1"),
    ] {
        assert!(matches!(result, Err(RepoError::NotFound { ref id, .. }) if id == "d1"));
    }
}

#[test]
fn delete_then_get_and_second_delete_fail_with_not_found() {
    let repo = repo();
    repo.create(&Department::new("d1", "Eng")).unwrap();

    repo.delete_by_id("d1").unwrap();

    assert!(repo.get_by_id("d1").unwrap_err().is_not_found());
    assert!(repo.delete_by_id("d1").unwrap_err().is_not_found());
    assert!(repo.list().unwrap().is_empty());
}

#[test]
fn create_rejects_empty_id() {
    let repo = repo();
    let err = repo.create(&Department::new("", "Nameless")).unwrap_err();
    assert!(matches!(err, RepoError::Validation(ValidationError::EmptyId)));
    assert!(repo.store().bucket_names().unwrap().is_empty());
}

#[test]
fn corrupted_value_surfaces_as_decode_error() {
    let repo = repo();
    repo.create(&Department::new("d1", "Eng")).unwrap();
    repo.store()
        .update(|tx| -> DbResult<()> {
            tx.create_bucket_if_not_exists(DEPARTMENT_BUCKET)?
                .put(b"d1", b"{not json")?;
            Ok(())
        })
        .unwrap();

    let err = repo.get_by_id("d1").unwrap_err();
    assert!(matches!(err, RepoError::Decode { ref key, .. } if key == "d1"));
    assert!(matches!(repo.list(), Err(RepoError::Decode { .. })));
    assert!(matches!(
        repo.update_by_id("d1", &Department::new("d1", "x")),
        Err(RepoError::Decode { .. })
    ));

    // Create still replaces the broken record.
    repo.create(&Department::new("d1", "Eng")).unwrap();
    assert_eq!(repo.get_by_id("d1").unwrap().name, "Eng");
}

#[test]
fn stored_value_is_plain_json() {
    let repo = repo();
    repo.create(&Department::new("d1", "Eng")).unwrap();

    let raw = repo
        .store()
        .view(|tx| -> DbResult<Option<Vec<u8>>> {
            match tx.bucket(DEPARTMENT_BUCKET)? {
                Some(bucket) => bucket.get(b"d1"),
                None => Ok(None),
            }
        })
        .unwrap()
        .unwrap();
    assert_eq!(raw, br#"{"id":"d1","name":"Eng"}"#);
}

#[test]
fn service_wraps_repository_calls() {
    let service = DepartmentService::new(repo());

    service
        .create_department(&Department::new("d1", "from service"))
        .unwrap();
    let fetched = service.get_department_by_id("d1").unwrap();
    assert_eq!(fetched.name, "from service");

    service.delete_department_by_id("d1").unwrap();
    assert!(service.list_departments().unwrap().is_empty());
}
