use crate::{
    entities::{class_sessions, class_teachers, classes, schedules},
    error::ServiceError,
    services::{
        actor::Actor,
        draft::{ParsedPatch, ScheduleDraft, ScheduleInput, SchedulePatch, ordered},
        mirror::SessionMirror,
        overlap::OverlapValidator,
    },
};
use chrono::Utc;
use log::{info, warn};
use models::class_teacher_role::ClassTeacherRole;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, DbErr, EntityTrait, IsolationLevel, QueryFilter, TransactionTrait,
};
use std::marker::PhantomData;
use uuid::Uuid;

/// Attempts per serializable transaction before a serialization failure is returned
pub const MAX_SERIALIZABLE_ATTEMPTS: usize = 3;

/// A schedule together with the session created alongside it
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleWithSession {
    pub schedule: schedules::Model,
    pub session: class_sessions::Model,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdatedSchedule {
    pub schedule: schedules::Model,
    /// Derived sessions moved onto the new values
    pub synced_sessions: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeletedSchedule {
    pub schedule: schedules::Model,
    pub deleted_sessions: u64,
}

/// Creates, updates and deletes single schedules, keeping their derived
/// sessions in step through `M`
pub struct ScheduleService<M>(PhantomData<M>);

impl<M: SessionMirror> ScheduleService<M> {
    /// Creates a schedule and its mirrored session in one transaction
    pub async fn create_schedule(
        db: &DatabaseConnection,
        actor: &Actor,
        input: ScheduleInput,
    ) -> Result<ScheduleWithSession, ServiceError> {
        actor.require_admin("create schedules")?;
        let draft = &ScheduleDraft::try_from(input)?;

        let created = retry_serializable(move || async move {
            let txn = begin_serializable(db).await?;
            let created = Self::create_in_txn(&txn, draft).await?;
            txn.commit().await?;
            Ok::<_, ServiceError>(created)
        })
        .await?;

        info!(
            "Created schedule {} for class {} with session {}",
            created.schedule.id, created.schedule.class_id, created.session.id
        );
        Ok(created)
    }

    /// The create path shared by single and bulk creation.
    ///
    /// Nothing is committed here; an error leaves the caller's transaction to roll back.
    pub(crate) async fn create_in_txn(
        txn: &DatabaseTransaction,
        draft: &ScheduleDraft,
    ) -> Result<ScheduleWithSession, ServiceError> {
        let class = find_class(txn, draft.class_id).await?;

        if let Some(existing) =
            OverlapValidator::find_conflict(txn, class.id, &draft.interval, None).await?
        {
            warn!(
                "Rejected schedule for class {}: overlaps schedule {}",
                class.id, existing.id
            );
            return Err(overlap_conflict(&existing));
        }

        let teacher_id = main_teacher(txn, class.id).await?;

        let now = Utc::now();
        let schedule = schedules::ActiveModel {
            id: Set(Uuid::new_v4()),
            class_id: Set(class.id),
            day: Set(draft.day),
            start_time: Set(draft.interval.start),
            end_time: Set(draft.interval.end),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(txn)
        .await?;

        let session =
            M::create_for_schedule(txn, &schedule, teacher_id, default_topic(&class)).await?;

        Ok(ScheduleWithSession { schedule, session })
    }

    /// Applies the supplied fields to a schedule and moves its derived sessions along
    pub async fn update_schedule(
        db: &DatabaseConnection,
        actor: &Actor,
        id: Uuid,
        patch: SchedulePatch,
    ) -> Result<UpdatedSchedule, ServiceError> {
        actor.require_admin("update schedules")?;

        let patch = patch.parse()?;
        if patch.is_empty() {
            return Err(ServiceError::Validation(
                "At least one schedule field must be supplied".into(),
            ));
        }
        let patch = &patch;

        let updated = retry_serializable(move || async move {
            let txn = begin_serializable(db).await?;
            let updated = Self::update_in_txn(&txn, id, patch).await?;
            txn.commit().await?;
            Ok::<_, ServiceError>(updated)
        })
        .await?;

        info!(
            "Updated schedule {} ({} sessions synced)",
            updated.schedule.id, updated.synced_sessions
        );
        Ok(updated)
    }

    async fn update_in_txn(
        txn: &DatabaseTransaction,
        id: Uuid,
        patch: &ParsedPatch,
    ) -> Result<UpdatedSchedule, ServiceError> {
        let current = find_schedule(txn, id).await?;

        let class_id = patch.class_id.unwrap_or(current.class_id);
        let class_changed = class_id != current.class_id;
        if class_changed {
            find_class(txn, class_id).await?;
        }

        let interval = ordered(
            patch.start_time.unwrap_or(current.start_time),
            patch.end_time.unwrap_or(current.end_time),
        )?;

        if (class_changed || interval != current.interval())
            && let Some(existing) =
                OverlapValidator::find_conflict(txn, class_id, &interval, Some(current.id))
                    .await?
        {
            warn!(
                "Rejected update of schedule {}: overlaps schedule {}",
                current.id, existing.id
            );
            return Err(overlap_conflict(&existing));
        }

        // Sessions of a class are always taught by that class's main teacher
        let teacher_id = if class_changed {
            Some(main_teacher(txn, class_id).await?)
        } else {
            None
        };

        let mut active: schedules::ActiveModel = current.clone().into();
        if let Some(class_id) = patch.class_id {
            active.class_id = Set(class_id);
        }
        if let Some(day) = patch.day {
            active.day = Set(day);
        }
        if let Some(start_time) = patch.start_time {
            active.start_time = Set(start_time);
        }
        if let Some(end_time) = patch.end_time {
            active.end_time = Set(end_time);
        }
        active.updated_at = Set(Utc::now());

        let schedule = active.update(txn).await?;
        let synced_sessions = M::sync_with_schedule(txn, &current, &schedule, teacher_id).await?;

        Ok(UpdatedSchedule {
            schedule,
            synced_sessions,
        })
    }

    /// Deletes a schedule and every session derived from it in one transaction
    pub async fn delete_schedule(
        db: &DatabaseConnection,
        actor: &Actor,
        id: Uuid,
    ) -> Result<DeletedSchedule, ServiceError> {
        actor.require_admin("delete schedules")?;

        let txn = db.begin().await?;
        let schedule = find_schedule(&txn, id).await?;

        let deleted_sessions = M::delete_for_schedule(&txn, &schedule).await?;
        schedules::Entity::delete_by_id(schedule.id)
            .exec(&txn)
            .await?;

        txn.commit().await?;

        info!(
            "Deleted schedule {} and {deleted_sessions} derived sessions",
            schedule.id
        );
        Ok(DeletedSchedule {
            schedule,
            deleted_sessions,
        })
    }
}

/// Runs `op` again when its serializable transaction is aborted by a concurrent one.
///
/// Gives up after [`MAX_SERIALIZABLE_ATTEMPTS`] and returns the last
/// [`ServiceError::Retryable`].
pub(crate) async fn retry_serializable<T, F, Fut>(mut op: F) -> Result<T, ServiceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ServiceError>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Err(ServiceError::Retryable(err)) if attempt < MAX_SERIALIZABLE_ATTEMPTS => {
                warn!("Serialization failure on attempt {attempt}, retrying: {err}");
                attempt += 1;
            }
            result => return result,
        }
    }
}

/// Opens the transaction used around validate + write, so two concurrent
/// requests cannot both pass the overlap check
pub(crate) async fn begin_serializable(
    db: &DatabaseConnection,
) -> Result<DatabaseTransaction, DbErr> {
    db.begin_with_config(Some(IsolationLevel::Serializable), None)
        .await
}

pub(crate) async fn find_class<C: ConnectionTrait>(
    conn: &C,
    class_id: Uuid,
) -> Result<classes::Model, ServiceError> {
    classes::Entity::find_by_id(class_id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Class", class_id))
}

pub(crate) async fn find_schedule<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<schedules::Model, ServiceError> {
    schedules::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Schedule", id))
}

/// Resolves the teacher assigned to `class_id` as its main teacher
pub(crate) async fn main_teacher<C: ConnectionTrait>(
    conn: &C,
    class_id: Uuid,
) -> Result<Uuid, ServiceError> {
    class_teachers::Entity::find()
        .filter(class_teachers::Column::ClassId.eq(class_id))
        .filter(class_teachers::Column::Role.eq(ClassTeacherRole::MainTeacher))
        .one(conn)
        .await?
        .map(|assignment| assignment.teacher_id)
        .ok_or_else(|| ServiceError::NotFound(format!("Class {class_id} has no main teacher")))
}

fn default_topic(class: &classes::Model) -> String {
    format!("{} session", class.name)
}

fn overlap_conflict(existing: &schedules::Model) -> ServiceError {
    ServiceError::Conflict(format!(
        "Schedule overlaps existing schedule {} ({} - {})",
        existing.id,
        existing.start_time.to_rfc3339(),
        existing.end_time.to_rfc3339()
    ))
}
