use serde::{Deserialize, Serialize};

/// Lifecycle state of a class session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "database", derive(sea_orm::EnumIter, sea_orm::DeriveActiveEnum))]
#[cfg_attr(feature = "database", sea_orm(rs_type = "String", db_type = "Text"))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    #[default]
    #[cfg_attr(feature = "database", sea_orm(string_value = "SCHEDULED"))]
    Scheduled,
    #[cfg_attr(feature = "database", sea_orm(string_value = "COMPLETED"))]
    Completed,
    #[cfg_attr(feature = "database", sea_orm(string_value = "CANCELLED"))]
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}
