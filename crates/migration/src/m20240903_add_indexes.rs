use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Overlap checks and class queries scan schedules by class, ordered by day and start
        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_class_id_day_start_time")
                    .table(Schedules::Table)
                    .col(Schedules::ClassId)
                    .col(Schedules::Day)
                    .col(Schedules::StartTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_schedules_day")
                    .table(Schedules::Table)
                    .col(Schedules::Day)
                    .to_owned(),
            )
            .await?;

        // Cascades look sessions up by their owning schedule
        manager
            .create_index(
                Index::create()
                    .name("idx_class_sessions_schedule_id")
                    .table(ClassSessions::Table)
                    .col(ClassSessions::ScheduleId)
                    .to_owned(),
            )
            .await?;

        // Legacy sessions without a schedule_id are matched by value
        manager
            .create_index(
                Index::create()
                    .name("idx_class_sessions_class_id_date")
                    .table(ClassSessions::Table)
                    .col(ClassSessions::ClassId)
                    .col(ClassSessions::Date)
                    .to_owned(),
            )
            .await?;

        // Indexes on the junction tables for faster traversals
        manager
            .create_index(
                Index::create()
                    .name("idx_class_teachers_class_id")
                    .table(ClassTeachers::Table)
                    .col(ClassTeachers::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_class_teachers_teacher_id")
                    .table(ClassTeachers::Table)
                    .col(ClassTeachers::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_class_students_class_id")
                    .table(ClassStudents::Table)
                    .col(ClassStudents::ClassId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_class_students_student_id")
                    .table(ClassStudents::Table)
                    .col(ClassStudents::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop indexes in reverse order
        for name in [
            "idx_class_students_student_id",
            "idx_class_students_class_id",
            "idx_class_teachers_teacher_id",
            "idx_class_teachers_class_id",
            "idx_class_sessions_class_id_date",
            "idx_class_sessions_schedule_id",
            "idx_schedules_day",
            "idx_schedules_class_id_day_start_time",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}

#[derive(Iden)]
enum Schedules {
    Table,
    ClassId,
    Day,
    StartTime,
}

#[derive(Iden)]
enum ClassSessions {
    Table,
    ScheduleId,
    ClassId,
    Date,
}

#[derive(Iden)]
enum ClassTeachers {
    Table,
    ClassId,
    TeacherId,
}

#[derive(Iden)]
enum ClassStudents {
    Table,
    ClassId,
    StudentId,
}
