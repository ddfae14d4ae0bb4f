mod common;

use common::*;
use database::{
    entities::{class_sessions, schedules},
    error::ServiceError,
    services::{
        Schedules,
        class_session::ClassSessionService,
        draft::{ScheduleInput, SchedulePatch},
        mirror::SessionMirror,
        overlap::OverlapValidator,
        schedule::{MAX_SERIALIZABLE_ATTEMPTS, ScheduleService},
    },
};
use models::{
    class_teacher_role::ClassTeacherRole, interval::Interval, session_status::SessionStatus,
};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait};
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// A mirror whose session writes always fail
struct FailingMirror;

impl SessionMirror for FailingMirror {
    async fn create_for_schedule<C: ConnectionTrait>(
        _conn: &C,
        _schedule: &schedules::Model,
        _teacher_id: Uuid,
        _topic: String,
    ) -> Result<class_sessions::Model, DbErr> {
        Err(DbErr::Custom("session store unavailable".into()))
    }

    async fn sync_with_schedule<C: ConnectionTrait>(
        _conn: &C,
        _previous: &schedules::Model,
        _updated: &schedules::Model,
        _teacher_id: Option<Uuid>,
    ) -> Result<u64, DbErr> {
        Err(DbErr::Custom("session store unavailable".into()))
    }

    async fn delete_for_schedule<C: ConnectionTrait>(
        _conn: &C,
        _schedule: &schedules::Model,
    ) -> Result<u64, DbErr> {
        Err(DbErr::Custom("session store unavailable".into()))
    }

    async fn find_for_schedules<C: ConnectionTrait>(
        _conn: &C,
        _schedule_ids: Vec<Uuid>,
    ) -> Result<Vec<class_sessions::Model>, DbErr> {
        Ok(vec![])
    }
}

/// Aborts session creation with a serialization failure `FAILURES` times, then succeeds
struct ContendedMirror<const FAILURES: usize>;

static CONTENDED_ONCE_CALLS: AtomicUsize = AtomicUsize::new(0);
static CONTENDED_ALWAYS_CALLS: AtomicUsize = AtomicUsize::new(0);

impl<const FAILURES: usize> ContendedMirror<FAILURES> {
    fn calls() -> &'static AtomicUsize {
        if FAILURES == usize::MAX {
            &CONTENDED_ALWAYS_CALLS
        } else {
            &CONTENDED_ONCE_CALLS
        }
    }
}

impl<const FAILURES: usize> SessionMirror for ContendedMirror<FAILURES> {
    async fn create_for_schedule<C: ConnectionTrait>(
        conn: &C,
        schedule: &schedules::Model,
        teacher_id: Uuid,
        topic: String,
    ) -> Result<class_sessions::Model, DbErr> {
        if Self::calls().fetch_add(1, Ordering::SeqCst) < FAILURES {
            return Err(DbErr::Custom(
                "could not serialize access due to concurrent update".into(),
            ));
        }
        ClassSessionService::create_for_schedule(conn, schedule, teacher_id, topic).await
    }

    async fn sync_with_schedule<C: ConnectionTrait>(
        conn: &C,
        previous: &schedules::Model,
        updated: &schedules::Model,
        teacher_id: Option<Uuid>,
    ) -> Result<u64, DbErr> {
        ClassSessionService::sync_with_schedule(conn, previous, updated, teacher_id).await
    }

    async fn delete_for_schedule<C: ConnectionTrait>(
        conn: &C,
        schedule: &schedules::Model,
    ) -> Result<u64, DbErr> {
        ClassSessionService::delete_for_schedule(conn, schedule).await
    }

    async fn find_for_schedules<C: ConnectionTrait>(
        conn: &C,
        schedule_ids: Vec<Uuid>,
    ) -> Result<Vec<class_sessions::Model>, DbErr> {
        ClassSessionService::find_for_schedules(conn, schedule_ids).await
    }
}

#[tokio::test]
async fn test_create_mirrors_session() {
    let db = setup_test_db().await;
    let (class, teacher) = staffed_class(&db, "Algebra").await;

    let created = Schedules::create_schedule(&db, &admin(), input(class.id, "08:00", "09:00"))
        .await
        .unwrap();

    assert_eq!(created.schedule.class_id, class.id);
    assert_eq!(created.schedule.day, day("2024-09-02"));
    assert_eq!(created.session.schedule_id, Some(created.schedule.id));
    assert_eq!(created.session.teacher_id, teacher.id);
    assert_eq!(created.session.date, created.schedule.day);
    assert_eq!(created.session.start_time, created.schedule.start_time);
    assert_eq!(created.session.end_time, created.schedule.end_time);
    assert_eq!(created.session.status, SessionStatus::Scheduled);
    assert_eq!(created.session.topic, "Algebra session");

    assert_eq!(count_schedules(&db).await, 1);
    assert_eq!(count_sessions(&db).await, 1);
}

#[tokio::test]
async fn test_touching_schedules_are_accepted() {
    let db = setup_test_db().await;
    let (class, _) = staffed_class(&db, "Algebra").await;

    Schedules::create_schedule(&db, &admin(), input(class.id, "08:00", "09:00"))
        .await
        .unwrap();
    Schedules::create_schedule(&db, &admin(), input(class.id, "09:00", "10:00"))
        .await
        .unwrap();

    assert_eq!(count_schedules(&db).await, 2);
}

#[tokio::test]
async fn test_overlap_is_rejected() {
    let db = setup_test_db().await;
    let (class, _) = staffed_class(&db, "Algebra").await;

    let existing = Schedules::create_schedule(&db, &admin(), input(class.id, "08:00", "09:00"))
        .await
        .unwrap();

    let err = Schedules::create_schedule(&db, &admin(), input(class.id, "08:30", "09:30"))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Conflict(_)));
    assert!(err.to_string().contains(&existing.schedule.id.to_string()));
    assert_eq!(count_schedules(&db).await, 1);
    assert_eq!(count_sessions(&db).await, 1);
}

#[tokio::test]
async fn test_overlap_is_per_class() {
    let db = setup_test_db().await;
    let (algebra, _) = staffed_class(&db, "Algebra").await;
    let (biology, _) = staffed_class(&db, "Biology").await;

    Schedules::create_schedule(&db, &admin(), input(algebra.id, "08:00", "09:00"))
        .await
        .unwrap();
    Schedules::create_schedule(&db, &admin(), input(biology.id, "08:00", "09:00"))
        .await
        .unwrap();

    assert_eq!(count_schedules(&db).await, 2);
}

#[tokio::test]
async fn test_invalid_times_are_rejected() {
    let db = setup_test_db().await;
    let (class, _) = staffed_class(&db, "Algebra").await;

    for (start, end) in [("09:00", "09:00"), ("10:00", "09:00")] {
        let err = Schedules::create_schedule(&db, &admin(), input(class.id, start, end))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    let err = Schedules::create_schedule(
        &db,
        &admin(),
        ScheduleInput {
            end_time: None,
            ..input(class.id, "08:00", "09:00")
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.to_string(), "end_time is required");

    assert_eq!(count_schedules(&db).await, 0);
}

#[tokio::test]
async fn test_non_admin_cannot_write() {
    let db = setup_test_db().await;
    let (class, _) = staffed_class(&db, "Algebra").await;
    let created = Schedules::create_schedule(&db, &admin(), input(class.id, "08:00", "09:00"))
        .await
        .unwrap();

    let err = Schedules::create_schedule(&db, &teacher_actor(), input(class.id, "10:00", "11:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    let err = Schedules::update_schedule(
        &db,
        &student_actor(),
        created.schedule.id,
        SchedulePatch {
            end_time: Some("2024-09-02T09:30:00Z".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    let err = Schedules::delete_schedule(&db, &teacher_actor(), created.schedule.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden(_)));

    let unchanged = schedules::Entity::find_by_id(created.schedule.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged.start_time, created.schedule.start_time);
    assert_eq!(unchanged.end_time, created.schedule.end_time);
    assert_eq!(count_schedules(&db).await, 1);
    assert_eq!(count_sessions(&db).await, 1);
}

#[tokio::test]
async fn test_missing_class_and_teacher() {
    let db = setup_test_db().await;

    let err = Schedules::create_schedule(&db, &admin(), input(Uuid::new_v4(), "08:00", "09:00"))
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    // An assistant alone does not make a class schedulable
    let class = insert_class(&db, "Chemistry").await;
    let assistant = insert_teacher(&db, "Assistant").await;
    assign_teacher(&db, class.id, assistant.id, ClassTeacherRole::AssistantTeacher).await;

    let err = Schedules::create_schedule(&db, &admin(), input(class.id, "08:00", "09:00"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), format!("Class {} has no main teacher", class.id));

    assert_eq!(count_schedules(&db).await, 0);
    assert_eq!(count_sessions(&db).await, 0);
}

#[tokio::test]
async fn test_failed_session_rolls_back_schedule() {
    let db = setup_test_db().await;
    let (class, _) = staffed_class(&db, "Algebra").await;

    let err = ScheduleService::<FailingMirror>::create_schedule(
        &db,
        &admin(),
        input(class.id, "08:00", "09:00"),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::Internal(_)));
    assert_eq!(count_schedules(&db).await, 0);
    assert_eq!(count_sessions(&db).await, 0);
}

#[tokio::test]
async fn test_create_retries_serialization_failure() {
    let db = setup_test_db().await;
    let (class, _) = staffed_class(&db, "Algebra").await;

    let created = ScheduleService::<ContendedMirror<1>>::create_schedule(
        &db,
        &admin(),
        input(class.id, "08:00", "09:00"),
    )
    .await
    .unwrap();

    assert_eq!(CONTENDED_ONCE_CALLS.load(Ordering::SeqCst), 2);
    assert_eq!(created.session.schedule_id, Some(created.schedule.id));
    assert_eq!(count_schedules(&db).await, 1);
    assert_eq!(count_sessions(&db).await, 1);
}

#[tokio::test]
async fn test_create_gives_up_after_repeated_serialization_failures() {
    let db = setup_test_db().await;
    let (class, _) = staffed_class(&db, "Algebra").await;

    let err = ScheduleService::<ContendedMirror<{ usize::MAX }>>::create_schedule(
        &db,
        &admin(),
        input(class.id, "08:00", "09:00"),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ServiceError::Retryable(_)));
    assert_eq!(
        CONTENDED_ALWAYS_CALLS.load(Ordering::SeqCst),
        MAX_SERIALIZABLE_ATTEMPTS
    );
    assert_eq!(count_schedules(&db).await, 0);
    assert_eq!(count_sessions(&db).await, 0);
}

#[tokio::test]
async fn test_update_syncs_sessions() {
    let db = setup_test_db().await;
    let (class, _) = staffed_class(&db, "Algebra").await;
    let created = Schedules::create_schedule(&db, &admin(), input(class.id, "08:00", "09:00"))
        .await
        .unwrap();

    let updated = Schedules::update_schedule(
        &db,
        &admin(),
        created.schedule.id,
        SchedulePatch {
            start_time: Some("2024-09-02T10:00:00Z".into()),
            end_time: Some("2024-09-02T11:30:00Z".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.synced_sessions, 1);
    assert_eq!(updated.schedule.start_time, at("2024-09-02T10:00:00Z"));
    assert_eq!(updated.schedule.end_time, at("2024-09-02T11:30:00Z"));
    assert_eq!(updated.schedule.day, created.schedule.day);

    let session = ClassSessionService::get_session(&db, created.session.id)
        .await
        .unwrap();
    assert_eq!(session.start_time, updated.schedule.start_time);
    assert_eq!(session.end_time, updated.schedule.end_time);
    assert_eq!(session.schedule_id, Some(created.schedule.id));
}

#[tokio::test]
async fn test_update_moves_class_and_teacher() {
    let db = setup_test_db().await;
    let (algebra, _) = staffed_class(&db, "Algebra").await;
    let (biology, biology_teacher) = staffed_class(&db, "Biology").await;
    let created = Schedules::create_schedule(&db, &admin(), input(algebra.id, "08:00", "09:00"))
        .await
        .unwrap();

    Schedules::update_schedule(
        &db,
        &admin(),
        created.schedule.id,
        SchedulePatch {
            class_id: Some(biology.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let session = ClassSessionService::get_session(&db, created.session.id)
        .await
        .unwrap();
    assert_eq!(session.class_id, biology.id);
    assert_eq!(session.teacher_id, biology_teacher.id);
}

#[tokio::test]
async fn test_update_revalidates_interval() {
    let db = setup_test_db().await;
    let (class, _) = staffed_class(&db, "Algebra").await;
    let first = Schedules::create_schedule(&db, &admin(), input(class.id, "08:00", "09:00"))
        .await
        .unwrap();
    let second = Schedules::create_schedule(&db, &admin(), input(class.id, "10:00", "11:00"))
        .await
        .unwrap();

    // Moving onto another schedule's slot is a conflict
    let err = Schedules::update_schedule(
        &db,
        &admin(),
        second.schedule.id,
        SchedulePatch {
            start_time: Some("2024-09-02T08:30:00Z".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Conflict(_)));

    // Only end_time supplied, but it falls before the stored start_time
    let err = Schedules::update_schedule(
        &db,
        &admin(),
        first.schedule.id,
        SchedulePatch {
            end_time: Some("2024-09-02T07:00:00Z".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    // Shrinking inside its own slot does not conflict with itself
    Schedules::update_schedule(
        &db,
        &admin(),
        first.schedule.id,
        SchedulePatch {
            end_time: Some("2024-09-02T08:45:00Z".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let err = Schedules::update_schedule(&db, &admin(), first.schedule.id, SchedulePatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Validation(_)));

    let err = Schedules::update_schedule(
        &db,
        &admin(),
        Uuid::new_v4(),
        SchedulePatch {
            day: Some("2024-09-03".into()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_cascades_to_sessions() {
    let db = setup_test_db().await;
    let (class, _) = staffed_class(&db, "Algebra").await;
    let created = Schedules::create_schedule(&db, &admin(), input(class.id, "08:00", "09:00"))
        .await
        .unwrap();

    let deleted = Schedules::delete_schedule(&db, &admin(), created.schedule.id)
        .await
        .unwrap();

    assert_eq!(deleted.schedule.id, created.schedule.id);
    assert_eq!(deleted.deleted_sessions, 1);
    assert_eq!(count_schedules(&db).await, 0);
    assert!(matches!(
        ClassSessionService::get_session(&db, created.session.id).await,
        Err(ServiceError::NotFound(_))
    ));

    let err = Schedules::delete_schedule(&db, &admin(), created.schedule.id)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}

#[tokio::test]
async fn test_delete_matches_legacy_sessions() {
    let db = setup_test_db().await;
    let (class, teacher) = staffed_class(&db, "Algebra").await;
    let created = Schedules::create_schedule(&db, &admin(), input(class.id, "08:00", "09:00"))
        .await
        .unwrap();
    let legacy = insert_legacy_session(&db, &created.schedule, teacher.id).await;

    // A legacy session at another time is not derived from the schedule
    let other = Schedules::create_schedule(&db, &admin(), input(class.id, "13:00", "14:00"))
        .await
        .unwrap();
    let unrelated = insert_legacy_session(&db, &other.schedule, teacher.id).await;

    let deleted = Schedules::delete_schedule(&db, &admin(), created.schedule.id)
        .await
        .unwrap();

    assert_eq!(deleted.deleted_sessions, 2);
    assert!(ClassSessionService::get_session(&db, legacy.id).await.is_err());
    assert!(ClassSessionService::get_session(&db, unrelated.id).await.is_ok());
}

#[tokio::test]
async fn test_failed_session_delete_keeps_schedule() {
    let db = setup_test_db().await;
    let (class, _) = staffed_class(&db, "Algebra").await;
    let created = Schedules::create_schedule(&db, &admin(), input(class.id, "08:00", "09:00"))
        .await
        .unwrap();

    let err = ScheduleService::<FailingMirror>::delete_schedule(&db, &admin(), created.schedule.id)
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Internal(_)));
    assert_eq!(count_schedules(&db).await, 1);
    assert_eq!(count_sessions(&db).await, 1);
}

#[tokio::test]
async fn test_overlap_validator_excludes_self() {
    let db = setup_test_db().await;
    let (class, _) = staffed_class(&db, "Algebra").await;
    let created = Schedules::create_schedule(&db, &admin(), input(class.id, "08:00", "09:00"))
        .await
        .unwrap();

    let inside = Interval::new(at("2024-09-02T08:15:00Z"), at("2024-09-02T08:45:00Z")).unwrap();
    let touching = Interval::new(at("2024-09-02T09:00:00Z"), at("2024-09-02T09:30:00Z")).unwrap();

    assert!(OverlapValidator::has_conflict(&db, class.id, &inside, None).await.unwrap());
    assert!(
        !OverlapValidator::has_conflict(&db, class.id, &inside, Some(created.schedule.id))
            .await
            .unwrap()
    );
    assert!(!OverlapValidator::has_conflict(&db, class.id, &touching, None).await.unwrap());
    assert!(
        !OverlapValidator::has_conflict(&db, Uuid::new_v4(), &inside, None)
            .await
            .unwrap()
    );
}
