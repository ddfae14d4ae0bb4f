use crate::{
    entities::{class_sessions, schedules},
    error::ServiceError,
    services::{actor::Actor, mirror::SessionMirror},
};
use chrono::Utc;
use log::info;
use models::{role::Role, session_status::SessionStatus};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, prelude::Expr,
};
use uuid::Uuid;

pub struct ClassSessionService;

impl ClassSessionService {
    pub async fn get_session(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<class_sessions::Model, ServiceError> {
        class_sessions::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Class session", id))
    }

    /// Marks a session completed, cancelled or scheduled again.
    ///
    /// Cancelling requires a reason; any other status clears it.
    pub async fn update_status(
        db: &DatabaseConnection,
        actor: &Actor,
        id: Uuid,
        status: SessionStatus,
        cancel_reason: Option<String>,
    ) -> Result<class_sessions::Model, ServiceError> {
        actor.require_any(&[Role::Admin, Role::Teacher], "change session status")?;

        let cancel_reason = cancel_reason
            .map(|reason| reason.trim().to_owned())
            .filter(|reason| !reason.is_empty());

        let cancel_reason = match status {
            SessionStatus::Cancelled => Some(cancel_reason.ok_or_else(|| {
                ServiceError::Validation("cancel_reason is required to cancel a session".into())
            })?),
            SessionStatus::Scheduled | SessionStatus::Completed => None,
        };

        let session = Self::get_session(db, id).await?;

        let mut active: class_sessions::ActiveModel = session.into();
        active.status = Set(status);
        active.cancel_reason = Set(cancel_reason);
        active.updated_at = Set(Utc::now());

        let session = active.update(db).await?;
        info!("Session {} is now {}", session.id, status.as_str());

        Ok(session)
    }

    /// Matches the sessions derived from `schedule`.
    ///
    /// Sessions carrying the schedule's id always match; sessions without a
    /// `schedule_id` match when class, date and times all equal the schedule's.
    fn derived_from(schedule: &schedules::Model) -> Condition {
        Condition::any()
            .add(class_sessions::Column::ScheduleId.eq(schedule.id))
            .add(
                Condition::all()
                    .add(class_sessions::Column::ScheduleId.is_null())
                    .add(class_sessions::Column::ClassId.eq(schedule.class_id))
                    .add(class_sessions::Column::Date.eq(schedule.day))
                    .add(class_sessions::Column::StartTime.eq(schedule.start_time))
                    .add(class_sessions::Column::EndTime.eq(schedule.end_time)),
            )
    }
}

impl SessionMirror for ClassSessionService {
    async fn create_for_schedule<C: ConnectionTrait>(
        conn: &C,
        schedule: &schedules::Model,
        teacher_id: Uuid,
        topic: String,
    ) -> Result<class_sessions::Model, DbErr> {
        let now = Utc::now();

        class_sessions::ActiveModel {
            id: Set(Uuid::new_v4()),
            schedule_id: Set(Some(schedule.id)),
            class_id: Set(schedule.class_id),
            teacher_id: Set(teacher_id),
            topic: Set(topic),
            description: Set(None),
            date: Set(schedule.day),
            start_time: Set(schedule.start_time),
            end_time: Set(schedule.end_time),
            status: Set(SessionStatus::Scheduled),
            cancel_reason: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(conn)
        .await
    }

    async fn sync_with_schedule<C: ConnectionTrait>(
        conn: &C,
        previous: &schedules::Model,
        updated: &schedules::Model,
        teacher_id: Option<Uuid>,
    ) -> Result<u64, DbErr> {
        // Legacy matches are adopted by setting their schedule_id
        let mut update = class_sessions::Entity::update_many()
            .col_expr(class_sessions::Column::ScheduleId, Expr::value(updated.id))
            .col_expr(class_sessions::Column::ClassId, Expr::value(updated.class_id))
            .col_expr(class_sessions::Column::Date, Expr::value(updated.day))
            .col_expr(
                class_sessions::Column::StartTime,
                Expr::value(updated.start_time),
            )
            .col_expr(class_sessions::Column::EndTime, Expr::value(updated.end_time))
            .col_expr(class_sessions::Column::UpdatedAt, Expr::value(Utc::now()));

        if let Some(teacher_id) = teacher_id {
            update = update.col_expr(class_sessions::Column::TeacherId, Expr::value(teacher_id));
        }

        let result = update
            .filter(Self::derived_from(previous))
            .exec(conn)
            .await?;

        Ok(result.rows_affected)
    }

    async fn delete_for_schedule<C: ConnectionTrait>(
        conn: &C,
        schedule: &schedules::Model,
    ) -> Result<u64, DbErr> {
        let result = class_sessions::Entity::delete_many()
            .filter(Self::derived_from(schedule))
            .exec(conn)
            .await?;

        Ok(result.rows_affected)
    }

    async fn find_for_schedules<C: ConnectionTrait>(
        conn: &C,
        schedule_ids: Vec<Uuid>,
    ) -> Result<Vec<class_sessions::Model>, DbErr> {
        if schedule_ids.is_empty() {
            return Ok(vec![]);
        }

        class_sessions::Entity::find()
            .filter(class_sessions::Column::ScheduleId.is_in(schedule_ids))
            .order_by_asc(class_sessions::Column::Date)
            .order_by_asc(class_sessions::Column::StartTime)
            .all(conn)
            .await
    }
}
