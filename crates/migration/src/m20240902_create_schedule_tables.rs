use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create schedules table
        manager
            .create_table(
                Table::create()
                    .table(Schedules::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Schedules::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Schedules::ClassId).uuid().not_null())
                    .col(ColumnDef::new(Schedules::Day).date().not_null())
                    .col(
                        ColumnDef::new(Schedules::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Schedules::EndTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Schedules::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Schedules::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-schedules-class_id")
                            .from(Schedules::Table, Schedules::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create class_sessions table
        manager
            .create_table(
                Table::create()
                    .table(ClassSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassSessions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    // Nullable so sessions created outside a schedule can still exist
                    .col(ColumnDef::new(ClassSessions::ScheduleId).uuid())
                    .col(ColumnDef::new(ClassSessions::ClassId).uuid().not_null())
                    .col(ColumnDef::new(ClassSessions::TeacherId).uuid().not_null())
                    .col(ColumnDef::new(ClassSessions::Topic).string().not_null())
                    .col(ColumnDef::new(ClassSessions::Description).text())
                    .col(ColumnDef::new(ClassSessions::Date).date().not_null())
                    .col(
                        ColumnDef::new(ClassSessions::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassSessions::EndTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassSessions::Status)
                            .string()
                            .not_null()
                            .default("SCHEDULED"),
                    )
                    .col(ColumnDef::new(ClassSessions::CancelReason).text())
                    .col(
                        ColumnDef::new(ClassSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ClassSessions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-class_sessions-schedule_id")
                            .from(ClassSessions::Table, ClassSessions::ScheduleId)
                            .to(Schedules::Table, Schedules::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-class_sessions-class_id")
                            .from(ClassSessions::Table, ClassSessions::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-class_sessions-teacher_id")
                            .from(ClassSessions::Table, ClassSessions::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClassSessions::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(Iden)]
enum Classes {
    Table,
    Id,
}

#[derive(Iden)]
enum Teachers {
    Table,
    Id,
}

#[derive(Iden)]
enum Schedules {
    Table,
    Id,
    ClassId,
    Day,
    StartTime,
    EndTime,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ClassSessions {
    Table,
    Id,
    ScheduleId,
    ClassId,
    TeacherId,
    Topic,
    Description,
    Date,
    StartTime,
    EndTime,
    Status,
    CancelReason,
    CreatedAt,
    UpdatedAt,
}
