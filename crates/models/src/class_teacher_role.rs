use serde::{Deserialize, Serialize};

/// The part a teacher plays in a class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sea_orm::EnumIter, sea_orm::DeriveActiveEnum))]
#[cfg_attr(feature = "database", sea_orm(rs_type = "String", db_type = "Text"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClassTeacherRole {
    /// Owns the class; every generated session is assigned to them
    #[cfg_attr(feature = "database", sea_orm(string_value = "MAIN_TEACHER"))]
    MainTeacher,
    #[cfg_attr(feature = "database", sea_orm(string_value = "ASSISTANT_TEACHER"))]
    AssistantTeacher,
}

impl ClassTeacherRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MainTeacher => "MAIN_TEACHER",
            Self::AssistantTeacher => "ASSISTANT_TEACHER",
        }
    }
}
