pub use sea_orm_migration::prelude::*;

mod m20240901_create_directory_tables;
mod m20240902_create_schedule_tables;
mod m20240903_add_indexes;
mod m20240904_add_schedule_overlap_constraint;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240901_create_directory_tables::Migration),
            Box::new(m20240902_create_schedule_tables::Migration),
            Box::new(m20240903_add_indexes::Migration),
            Box::new(m20240904_add_schedule_overlap_constraint::Migration),
        ]
    }
}
