use crate::entities::{class_sessions, schedules};
use sea_orm::{ConnectionTrait, DbErr};
use std::future::Future;
use uuid::Uuid;

/// How the schedule services create, sync, find and delete the sessions derived
/// from a schedule.
///
/// The schedule services only depend on this contract; the class session module
/// implements it. Every method runs on the caller's connection so it joins the
/// caller's transaction.
pub trait SessionMirror {
    /// Creates the session mirrored from a freshly inserted schedule
    fn create_for_schedule<C: ConnectionTrait>(
        conn: &C,
        schedule: &schedules::Model,
        teacher_id: Uuid,
        topic: String,
    ) -> impl Future<Output = Result<class_sessions::Model, DbErr>> + Send;

    /// Moves the sessions derived from `previous` onto the values of `updated`
    ///
    /// # Returns
    /// The number of sessions changed
    fn sync_with_schedule<C: ConnectionTrait>(
        conn: &C,
        previous: &schedules::Model,
        updated: &schedules::Model,
        teacher_id: Option<Uuid>,
    ) -> impl Future<Output = Result<u64, DbErr>> + Send;

    /// Deletes every session derived from `schedule`
    ///
    /// # Returns
    /// The number of sessions removed
    fn delete_for_schedule<C: ConnectionTrait>(
        conn: &C,
        schedule: &schedules::Model,
    ) -> impl Future<Output = Result<u64, DbErr>> + Send;

    /// Fetches the sessions that reference any of `schedule_ids`
    fn find_for_schedules<C: ConnectionTrait>(
        conn: &C,
        schedule_ids: Vec<Uuid>,
    ) -> impl Future<Output = Result<Vec<class_sessions::Model>, DbErr>> + Send;
}
