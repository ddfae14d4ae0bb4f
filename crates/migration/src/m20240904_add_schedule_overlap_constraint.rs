use sea_orm_migration::{prelude::*, sea_orm::DatabaseBackend};

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Kept in sync with `database::error::OVERLAP_CONSTRAINT`
const OVERLAP_CONSTRAINT: &str = "schedules_no_overlap";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Exclusion constraints are Postgres-only; other backends rely on the
        // serializable transaction around validate + insert
        if manager.get_database_backend() != DatabaseBackend::Postgres {
            return Ok(());
        }

        manager
            .get_connection()
            .execute_unprepared("CREATE EXTENSION IF NOT EXISTS btree_gist;")
            .await?;

        // Two schedules of one class may never share an instant; '[)' keeps
        // touching intervals legal
        manager
            .get_connection()
            .execute_unprepared(&format!(
                "ALTER TABLE schedules ADD CONSTRAINT {OVERLAP_CONSTRAINT}
                EXCLUDE USING gist (
                    class_id WITH =,
                    tstzrange(start_time, end_time, '[)') WITH &&
                );"
            ))
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DatabaseBackend::Postgres {
            return Ok(());
        }

        manager
            .get_connection()
            .execute_unprepared(&format!(
                "ALTER TABLE schedules DROP CONSTRAINT IF EXISTS {OVERLAP_CONSTRAINT};"
            ))
            .await?;

        Ok(())
    }
}
