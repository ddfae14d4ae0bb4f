#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, Utc};
use database::{
    entities::{
        class_sessions, class_students, class_teachers, classes, schedules, students, teachers,
    },
    services::{actor::Actor, draft::ScheduleInput},
};
use migration::{Migrator, MigratorTrait};
use models::{class_teacher_role::ClassTeacherRole, role::Role, session_status::SessionStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    PaginatorTrait,
};
use uuid::Uuid;

/// A migrated in-memory database.
///
/// One connection only: every pooled connection would otherwise open its own
/// empty in-memory database.
pub async fn setup_test_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub fn admin() -> Actor {
    Actor::new("admin-1", Some(Role::Admin))
}

pub fn teacher_actor() -> Actor {
    Actor::new("teacher-1", Some(Role::Teacher))
}

pub fn student_actor() -> Actor {
    Actor::new("student-1", Some(Role::Student))
}

pub fn at(value: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(value).unwrap().with_timezone(&Utc)
}

pub fn day(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

/// Wire-shaped input for a schedule on 2024-09-02
pub fn input(class_id: Uuid, start: &str, end: &str) -> ScheduleInput {
    ScheduleInput {
        class_id: Some(class_id),
        day: Some("2024-09-02".into()),
        start_time: Some(format!("2024-09-02T{start}:00Z")),
        end_time: Some(format!("2024-09-02T{end}:00Z")),
    }
}

pub async fn insert_class(db: &DatabaseConnection, name: &str) -> classes::Model {
    let now = Utc::now();
    classes::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.into()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn insert_teacher(db: &DatabaseConnection, name: &str) -> teachers::Model {
    let now = Utc::now();
    teachers::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.into()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn insert_student(db: &DatabaseConnection, name: &str) -> students::Model {
    let now = Utc::now();
    students::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.into()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn assign_teacher(
    db: &DatabaseConnection,
    class_id: Uuid,
    teacher_id: Uuid,
    role: ClassTeacherRole,
) {
    class_teachers::ActiveModel {
        id: Set(Uuid::new_v4()),
        class_id: Set(class_id),
        teacher_id: Set(teacher_id),
        role: Set(role),
    }
    .insert(db)
    .await
    .unwrap();
}

pub async fn enroll(db: &DatabaseConnection, class_id: Uuid, student_id: Uuid) {
    class_students::ActiveModel {
        id: Set(Uuid::new_v4()),
        class_id: Set(class_id),
        student_id: Set(student_id),
    }
    .insert(db)
    .await
    .unwrap();
}

/// A class with a main teacher, ready to be scheduled
pub async fn staffed_class(
    db: &DatabaseConnection,
    name: &str,
) -> (classes::Model, teachers::Model) {
    let class = insert_class(db, name).await;
    let teacher = insert_teacher(db, &format!("{name} teacher")).await;
    assign_teacher(db, class.id, teacher.id, ClassTeacherRole::MainTeacher).await;
    (class, teacher)
}

/// Inserts a session that predates the schedule back-reference
pub async fn insert_legacy_session(
    db: &DatabaseConnection,
    schedule: &schedules::Model,
    teacher_id: Uuid,
) -> class_sessions::Model {
    let now = Utc::now();
    class_sessions::ActiveModel {
        id: Set(Uuid::new_v4()),
        schedule_id: Set(None),
        class_id: Set(schedule.class_id),
        teacher_id: Set(teacher_id),
        topic: Set("Legacy session".into()),
        description: Set(None),
        date: Set(schedule.day),
        start_time: Set(schedule.start_time),
        end_time: Set(schedule.end_time),
        status: Set(SessionStatus::Scheduled),
        cancel_reason: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn count_schedules(db: &DatabaseConnection) -> u64 {
    schedules::Entity::find().count(db).await.unwrap()
}

pub async fn count_sessions(db: &DatabaseConnection) -> u64 {
    class_sessions::Entity::find().count(db).await.unwrap()
}
