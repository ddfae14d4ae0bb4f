use chrono::{DateTime, NaiveDate, Utc};
use database::entities::class_sessions;
use models::session_status::SessionStatus;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassSessionResponse {
    pub id: Uuid,
    /// Absent for sessions created before schedules were linked
    pub schedule_id: Option<Uuid>,
    pub class_id: Uuid,
    pub teacher_id: Uuid,
    pub topic: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// One of `SCHEDULED`, `COMPLETED`, `CANCELLED`
    #[schema(value_type = String)]
    pub status: SessionStatus,
    pub cancel_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<class_sessions::Model> for ClassSessionResponse {
    fn from(session: class_sessions::Model) -> Self {
        Self {
            id: session.id,
            schedule_id: session.schedule_id,
            class_id: session.class_id,
            teacher_id: session.teacher_id,
            topic: session.topic,
            description: session.description,
            date: session.date,
            start_time: session.start_time,
            end_time: session.end_time,
            status: session.status,
            cancel_reason: session.cancel_reason,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    #[schema(value_type = String, example = "CANCELLED")]
    pub status: SessionStatus,
    /// Required when cancelling
    pub cancel_reason: Option<String>,
}
