use crate::{
    entities::{classes, schedules},
    error::ServiceError,
    services::{
        actor::Actor,
        draft::{ScheduleDraft, ScheduleInput, check_batch},
        mirror::SessionMirror,
        schedule::{ScheduleService, ScheduleWithSession, begin_serializable, retry_serializable},
    },
};
use log::info;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait};
use std::{
    collections::{HashMap, HashSet},
    marker::PhantomData,
};
use uuid::Uuid;

/// Totals of a bulk cascading delete
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkDeleteSummary {
    pub deleted_schedules: u64,
    pub deleted_sessions: u64,
    /// Class name of each deleted schedule, in request order
    pub class_names: Vec<String>,
}

/// Creates and deletes many schedules as a single unit
pub struct BulkScheduleService<M>(PhantomData<M>);

impl<M: SessionMirror> BulkScheduleService<M> {
    /// Creates every schedule of the batch with its session, or none of them.
    ///
    /// Candidates are validated individually and then compared pairwise before
    /// the store is touched.
    pub async fn bulk_create(
        db: &DatabaseConnection,
        actor: &Actor,
        inputs: Vec<ScheduleInput>,
    ) -> Result<Vec<ScheduleWithSession>, ServiceError> {
        actor.require_admin("create schedules")?;

        if inputs.is_empty() {
            return Err(ServiceError::Validation(
                "At least one schedule is required".into(),
            ));
        }

        let drafts = inputs
            .into_iter()
            .enumerate()
            .map(|(idx, input)| ScheduleDraft::try_from(input).map_err(|err| at_position(idx, err)))
            .collect::<Result<Vec<_>, _>>()?;

        check_batch(&drafts)?;

        let drafts = &drafts;
        let created = retry_serializable(move || async move {
            let txn = begin_serializable(db).await?;
            let mut created = Vec::with_capacity(drafts.len());
            for (idx, draft) in drafts.iter().enumerate() {
                let result = ScheduleService::<M>::create_in_txn(&txn, draft)
                    .await
                    .map_err(|err| at_position(idx, err))?;
                created.push(result);
            }
            txn.commit().await?;
            Ok::<_, ServiceError>(created)
        })
        .await?;

        info!("Bulk created {} schedules", created.len());
        Ok(created)
    }

    /// Deletes the given schedules and their derived sessions in one transaction.
    ///
    /// If any id is unknown, all unknown ids are reported together and nothing is deleted.
    pub async fn bulk_delete(
        db: &DatabaseConnection,
        actor: &Actor,
        ids: Vec<Uuid>,
    ) -> Result<BulkDeleteSummary, ServiceError> {
        actor.require_admin("delete schedules")?;

        let mut seen = HashSet::new();
        let ids: Vec<Uuid> = ids.into_iter().filter(|id| seen.insert(*id)).collect();
        if ids.is_empty() {
            return Err(ServiceError::Validation(
                "At least one schedule id is required".into(),
            ));
        }

        let txn = db.begin().await?;

        let mut found: HashMap<Uuid, schedules::Model> = schedules::Entity::find()
            .filter(schedules::Column::Id.is_in(ids.clone()))
            .all(&txn)
            .await?
            .into_iter()
            .map(|schedule| (schedule.id, schedule))
            .collect();

        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !found.contains_key(id))
            .map(|id| id.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(ServiceError::NotFound(format!(
                "Schedules not found: {}",
                missing.join(", ")
            )));
        }

        let class_ids: HashSet<Uuid> = found.values().map(|s| s.class_id).collect();
        let class_names: HashMap<Uuid, String> = classes::Entity::find()
            .filter(classes::Column::Id.is_in(class_ids))
            .all(&txn)
            .await?
            .into_iter()
            .map(|class| (class.id, class.name))
            .collect();

        let mut summary = BulkDeleteSummary::default();
        for id in &ids {
            let Some(schedule) = found.remove(id) else {
                continue;
            };

            summary.deleted_sessions += M::delete_for_schedule(&txn, &schedule).await?;
            schedules::Entity::delete_by_id(schedule.id)
                .exec(&txn)
                .await?;

            summary.deleted_schedules += 1;
            summary.class_names.push(
                class_names
                    .get(&schedule.class_id)
                    .cloned()
                    .unwrap_or_default(),
            );
        }

        txn.commit().await?;

        info!(
            "Bulk deleted {} schedules and {} derived sessions",
            summary.deleted_schedules, summary.deleted_sessions
        );
        Ok(summary)
    }
}

/// Prefixes a per-item error with the item's 1-based position in the batch
fn at_position(idx: usize, err: ServiceError) -> ServiceError {
    let position = idx + 1;
    match err {
        ServiceError::Validation(msg) => {
            ServiceError::Validation(format!("Schedule #{position}: {msg}"))
        }
        ServiceError::Conflict(msg) => {
            ServiceError::Conflict(format!("Schedule #{position}: {msg}"))
        }
        ServiceError::NotFound(msg) => {
            ServiceError::NotFound(format!("Schedule #{position}: {msg}"))
        }
        other => other,
    }
}
