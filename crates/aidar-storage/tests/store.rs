use aidar_core::models::assignment::{Assignment, AssignmentStatus};
use aidar_core::models::patient::Patient;
use aidar_core::models::physician::Physician;
use aidar_storage::backend::Backend;
use aidar_storage::error::StorageError;
use aidar_storage::{Filter, MemoryStore, Store};
use serde_json::json;
use uuid::Uuid;

fn patient(name: &str, email: &str) -> Patient {
    Patient {
        id: None,
        name: name.to_string(),
        email: email.to_string(),
        created_at: None,
    }
}

fn assignment(physician: Uuid, survey: Uuid, patient: Uuid) -> Assignment {
    Assignment::pending(physician, survey, patient, jiff::Timestamp::now())
}

#[tokio::test]
async fn create_assigns_id_and_created_at() {
    let store = MemoryStore::in_memory();
    let created = store.create(patient("Ada", "ada@example.com")).await.unwrap();

    let id = created.id.expect("id assigned");
    assert!(created.created_at.is_some());

    let fetched: Patient = store.get(id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let store = MemoryStore::in_memory();
    store.create(patient("Ada", "ada@example.com")).await.unwrap();

    let err = store
        .create(patient("Ada L.", "ada@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Duplicate { ref field, .. } if field == "email"));

    // Same email inside one batch.
    let err = store
        .create_bulk(vec![
            patient("Bob", "bob@example.com"),
            patient("Robert", "bob@example.com"),
        ])
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Duplicate { .. }));
    assert_eq!(store.list::<Patient>(Filter::new()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn physicians_and_patients_have_separate_email_spaces() {
    let store = MemoryStore::in_memory();
    store.create(patient("Ada", "ada@example.com")).await.unwrap();
    store
        .create(Physician {
            id: None,
            name: "Dr. Ada".to_string(),
            email: "ada@example.com".to_string(),
            created_at: None,
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn list_filters_by_exact_reference_match() {
    let store = MemoryStore::in_memory();
    let (physician, survey_a, survey_b) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    let (p1, p2) = (Uuid::new_v4(), Uuid::new_v4());

    store
        .create_bulk(vec![
            assignment(physician, survey_a, p1),
            assignment(physician, survey_a, p2),
            assignment(physician, survey_b, p1),
        ])
        .await
        .unwrap();

    let for_a: Vec<Assignment> = store
        .list(Filter::new().survey(survey_a).physician(physician))
        .await
        .unwrap();
    assert_eq!(for_a.len(), 2);

    let for_p1: Vec<Assignment> = store.list(Filter::new().patient(p1)).await.unwrap();
    assert_eq!(for_p1.len(), 2);
    assert!(for_p1.iter().all(|a| a.patient_id == p1));

    let other: Vec<Assignment> = store
        .list(Filter::new().physician(Uuid::new_v4()))
        .await
        .unwrap();
    assert!(other.is_empty());
}

#[tokio::test]
async fn update_merges_partial_fields() {
    let store = MemoryStore::in_memory();
    let created = store
        .create(assignment(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()))
        .await
        .unwrap();
    let id = created.id.unwrap();

    let updated: Assignment = store
        .update(
            id,
            json!({ "status": "completed", "completedAt": "2024-10-22T09:30:00Z", "id": Uuid::new_v4() }),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, Some(id));
    assert_eq!(updated.status, AssignmentStatus::Completed);
    assert!(updated.completed_at.is_some());
    assert_eq!(updated.assigned_at, created.assigned_at);
    assert_eq!(updated.patient_id, created.patient_id);
}

#[tokio::test]
async fn update_rejects_non_object_and_ill_typed_patches() {
    let store = MemoryStore::in_memory();
    let created = store
        .create(assignment(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4()))
        .await
        .unwrap();
    let id = created.id.unwrap();

    let err = store.update::<Assignment>(id, json!([1, 2])).await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidPatch(_)));

    let err = store
        .update::<Assignment>(id, json!({ "status": "archived" }))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));

    let unchanged: Assignment = store.get(id).await.unwrap();
    assert_eq!(unchanged, created);
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let store = MemoryStore::in_memory();
    let id = Uuid::new_v4();

    assert!(store.get::<Patient>(id).await.unwrap_err().is_not_found());
    assert!(store.remove::<Patient>(id).await.unwrap_err().is_not_found());
    assert!(
        store
            .update::<Patient>(id, json!({ "name": "x" }))
            .await
            .unwrap_err()
            .is_not_found()
    );
}

#[tokio::test]
async fn remove_bulk_skips_missing_ids() {
    let store = MemoryStore::in_memory();
    let created = store
        .create_bulk(vec![
            patient("Ada", "ada@example.com"),
            patient("Bob", "bob@example.com"),
        ])
        .await
        .unwrap();
    let ids: Vec<Uuid> = created.iter().filter_map(|p| p.id).collect();

    store
        .remove_bulk::<Patient>(&[ids[0], Uuid::new_v4()])
        .await
        .unwrap();

    let remaining: Vec<Patient> = store.list(Filter::new()).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, Some(ids[1]));
}

#[tokio::test]
async fn stray_objects_under_a_prefix_are_ignored() {
    let store = MemoryStore::in_memory();
    store.create(patient("Ada", "ada@example.com")).await.unwrap();
    store
        .backend()
        .put_json("patients/notes.txt", &json!({ "name": "not a record" }))
        .await
        .unwrap();

    let patients: Vec<Patient> = store.list(Filter::new()).await.unwrap();
    assert_eq!(patients.len(), 1);
}

#[test]
fn filter_deserializes_from_query_fields() {
    let survey = Uuid::new_v4();
    let filter: Filter = serde_json::from_value(json!({ "surveyId": survey })).unwrap();
    assert_eq!(filter, Filter::new().survey(survey));
    assert!(filter.matches(&json!({ "surveyId": survey.to_string(), "patientId": "x" })));
    assert!(!filter.matches(&json!({ "patientId": "x" })));
}
