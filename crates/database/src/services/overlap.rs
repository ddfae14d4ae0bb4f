use crate::entities::schedules;
use models::interval::Interval;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

/// Checks candidate time slots against the schedules already stored for a class
pub struct OverlapValidator;

impl OverlapValidator {
    /// Whether `candidate` overlaps any stored schedule of `class_id`
    ///
    /// # Arguments
    /// * `exclude_id` - A schedule to ignore, used when updating it in place
    pub async fn has_conflict<C: ConnectionTrait>(
        conn: &C,
        class_id: Uuid,
        candidate: &Interval,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, DbErr> {
        Ok(Self::find_conflict(conn, class_id, candidate, exclude_id)
            .await?
            .is_some())
    }

    /// Returns the first stored schedule of `class_id` that overlaps `candidate`
    pub async fn find_conflict<C: ConnectionTrait>(
        conn: &C,
        class_id: Uuid,
        candidate: &Interval,
        exclude_id: Option<Uuid>,
    ) -> Result<Option<schedules::Model>, DbErr> {
        let mut query = schedules::Entity::find().filter(schedules::Column::ClassId.eq(class_id));

        if let Some(exclude_id) = exclude_id {
            query = query.filter(schedules::Column::Id.ne(exclude_id));
        }

        let existing = query.all(conn).await?;

        Ok(existing
            .into_iter()
            .find(|schedule| candidate.overlaps(&schedule.interval())))
    }
}
