use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "classes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::schedules::Entity")]
    Schedules,
    #[sea_orm(has_many = "super::class_sessions::Entity")]
    ClassSessions,
    #[sea_orm(has_many = "super::class_teachers::Entity")]
    ClassTeachers,
    #[sea_orm(has_many = "super::class_students::Entity")]
    ClassStudents,
}

impl Related<super::schedules::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Schedules.def()
    }
}

impl Related<super::class_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassSessions.def()
    }
}

impl Related<super::class_teachers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassTeachers.def()
    }
}

impl Related<super::class_students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassStudents.def()
    }
}

// Many-to-many relationship with teachers
impl Related<super::teachers::Entity> for Entity {
    fn to() -> RelationDef {
        super::class_teachers::Relation::Teacher.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::class_teachers::Relation::Class.def().rev())
    }
}

// Many-to-many relationship with students
impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        super::class_students::Relation::Student.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::class_students::Relation::Class.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
