mod common;

use common::*;
use database::{
    error::ServiceError,
    services::{BulkSchedules, Schedules, draft::ScheduleInput},
};
use uuid::Uuid;

#[tokio::test]
async fn test_bulk_create_all_or_nothing() {
    let db = setup_test_db().await;
    let (algebra, _) = staffed_class(&db, "Algebra").await;
    let (biology, _) = staffed_class(&db, "Biology").await;

    let created = BulkSchedules::bulk_create(
        &db,
        &admin(),
        vec![
            input(algebra.id, "08:00", "09:00"),
            input(algebra.id, "09:00", "10:00"),
            input(biology.id, "08:30", "09:30"),
        ],
    )
    .await
    .unwrap();

    assert_eq!(created.len(), 3);
    for item in &created {
        assert_eq!(item.session.schedule_id, Some(item.schedule.id));
    }
    assert_eq!(count_schedules(&db).await, 3);
    assert_eq!(count_sessions(&db).await, 3);
}

#[tokio::test]
async fn test_bulk_create_rejects_overlap_within_batch() {
    let db = setup_test_db().await;
    let (class, _) = staffed_class(&db, "Algebra").await;

    let err = BulkSchedules::bulk_create(
        &db,
        &admin(),
        vec![
            input(class.id, "08:00", "09:00"),
            input(class.id, "11:00", "12:00"),
            input(class.id, "08:30", "09:30"),
        ],
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));
    assert!(err.to_string().starts_with("Schedules #1 and #3 overlap"));
    assert_eq!(count_schedules(&db).await, 0);
    assert_eq!(count_sessions(&db).await, 0);
}

#[tokio::test]
async fn test_bulk_create_store_conflict_leaves_nothing() {
    let db = setup_test_db().await;
    let (class, _) = staffed_class(&db, "Algebra").await;
    Schedules::create_schedule(&db, &admin(), input(class.id, "12:00", "13:00"))
        .await
        .unwrap();

    let err = BulkSchedules::bulk_create(
        &db,
        &admin(),
        vec![
            input(class.id, "08:00", "09:00"),
            input(class.id, "12:30", "13:30"),
        ],
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));
    assert!(err.to_string().starts_with("Schedule #2:"));
    // The first candidate was inserted before the conflict and must be rolled back
    assert_eq!(count_schedules(&db).await, 1);
    assert_eq!(count_sessions(&db).await, 1);
}

#[tokio::test]
async fn test_bulk_create_validation() {
    let db = setup_test_db().await;
    let (class, _) = staffed_class(&db, "Algebra").await;

    let err = BulkSchedules::bulk_create(&db, &admin(), vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = BulkSchedules::bulk_create(
        &db,
        &admin(),
        vec![
            input(class.id, "08:00", "09:00"),
            ScheduleInput {
                start_time: None,
                ..input(class.id, "10:00", "11:00")
            },
        ],
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "Schedule #2: start_time is required");

    let err = BulkSchedules::bulk_create(
        &db,
        &teacher_actor(),
        vec![input(class.id, "08:00", "09:00")],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    assert_eq!(count_schedules(&db).await, 0);
}

#[tokio::test]
async fn test_bulk_delete_cascades() {
    let db = setup_test_db().await;
    let (algebra, teacher) = staffed_class(&db, "Algebra").await;
    let (biology, _) = staffed_class(&db, "Biology").await;

    let created = BulkSchedules::bulk_create(
        &db,
        &admin(),
        vec![
            input(algebra.id, "08:00", "09:00"),
            input(biology.id, "08:00", "09:00"),
            input(biology.id, "10:00", "11:00"),
        ],
    )
    .await
    .unwrap();
    insert_legacy_session(&db, &created[0].schedule, teacher.id).await;

    let summary = BulkSchedules::bulk_delete(
        &db,
        &admin(),
        vec![
            created[0].schedule.id,
            created[1].schedule.id,
            created[0].schedule.id,
        ],
    )
    .await
    .unwrap();

    assert_eq!(summary.deleted_schedules, 2);
    assert_eq!(summary.deleted_sessions, 3);
    assert_eq!(summary.class_names, vec!["Algebra", "Biology"]);
    assert_eq!(count_schedules(&db).await, 1);
    assert_eq!(count_sessions(&db).await, 1);
}

#[tokio::test]
async fn test_bulk_delete_reports_all_missing() {
    let db = setup_test_db().await;
    let (class, _) = staffed_class(&db, "Algebra").await;
    let created = Schedules::create_schedule(&db, &admin(), input(class.id, "08:00", "09:00"))
        .await
        .unwrap();

    let missing_a = Uuid::new_v4();
    let missing_b = Uuid::new_v4();
    let err = BulkSchedules::bulk_delete(
        &db,
        &admin(),
        vec![missing_a, created.schedule.id, missing_b],
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(_)));
    let msg = err.to_string();
    assert!(msg.contains(&missing_a.to_string()));
    assert!(msg.contains(&missing_b.to_string()));
    assert!(!msg.contains(&created.schedule.id.to_string()));

    assert_eq!(count_schedules(&db).await, 1);
    assert_eq!(count_sessions(&db).await, 1);

    let err = BulkSchedules::bulk_delete(&db, &admin(), vec![])
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));
}

#[tokio::test]
async fn test_bulk_delete_requires_admin() {
    let db = setup_test_db().await;
    let (class, _) = staffed_class(&db, "Algebra").await;
    let created = Schedules::create_schedule(&db, &admin(), input(class.id, "08:00", "09:00"))
        .await
        .unwrap();

    for actor in [teacher_actor(), student_actor()] {
        let err = BulkSchedules::bulk_delete(&db, &actor, vec![created.schedule.id])
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    assert_eq!(count_schedules(&db).await, 1);
    assert_eq!(count_sessions(&db).await, 1);
}
