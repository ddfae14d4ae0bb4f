use crate::dtos::class_session::ClassSessionResponse;
use chrono::{DateTime, NaiveDate, Utc};
use database::{
    entities::{classes, schedules},
    services::{
        bulk_schedule::BulkDeleteSummary,
        draft::{ScheduleInput, SchedulePatch},
        query_schedule::{AnnotatedSchedule, AssignedTeacher, ScheduleDetail, ScheduleLookup},
        schedule::{DeletedSchedule, ScheduleWithSession, UpdatedSchedule},
    },
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Fields of a new schedule. Times are ISO-8601 date-times with an offset.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateScheduleRequest {
    pub class_id: Option<Uuid>,
    #[schema(example = "2024-09-02")]
    pub day: Option<String>,
    #[schema(example = "2024-09-02T08:00:00Z")]
    pub start_time: Option<String>,
    #[schema(example = "2024-09-02T09:00:00Z")]
    pub end_time: Option<String>,
}

impl From<CreateScheduleRequest> for ScheduleInput {
    fn from(req: CreateScheduleRequest) -> Self {
        Self {
            class_id: req.class_id,
            day: req.day,
            start_time: req.start_time,
            end_time: req.end_time,
        }
    }
}

/// Fields to change; omitted fields keep their stored value
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateScheduleRequest {
    pub class_id: Option<Uuid>,
    pub day: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl From<UpdateScheduleRequest> for SchedulePatch {
    fn from(req: UpdateScheduleRequest) -> Self {
        Self {
            class_id: req.class_id,
            day: req.day,
            start_time: req.start_time,
            end_time: req.end_time,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkCreateRequest {
    pub schedules: Vec<CreateScheduleRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BulkDeleteRequest {
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ClassOrDayRequest {
    /// Takes precedence over `day` alone
    pub class_id: Option<Uuid>,
    pub day: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MultipleClassesRequest {
    pub class_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleResponse {
    pub id: Uuid,
    pub class_id: Uuid,
    pub day: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<schedules::Model> for ScheduleResponse {
    fn from(schedule: schedules::Model) -> Self {
        Self {
            id: schedule.id,
            class_id: schedule.class_id,
            day: schedule.day,
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            created_at: schedule.created_at,
            updated_at: schedule.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedScheduleResponse {
    pub schedule: ScheduleResponse,
    pub session: ClassSessionResponse,
}

impl From<ScheduleWithSession> for CreatedScheduleResponse {
    fn from(created: ScheduleWithSession) -> Self {
        Self {
            schedule: created.schedule.into(),
            session: created.session.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdatedScheduleResponse {
    pub schedule: ScheduleResponse,
    pub synced_sessions: u64,
}

impl From<UpdatedSchedule> for UpdatedScheduleResponse {
    fn from(updated: UpdatedSchedule) -> Self {
        Self {
            schedule: updated.schedule.into(),
            synced_sessions: updated.synced_sessions,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedScheduleResponse {
    pub schedule: ScheduleResponse,
    pub deleted_sessions: u64,
}

impl From<DeletedSchedule> for DeletedScheduleResponse {
    fn from(deleted: DeletedSchedule) -> Self {
        Self {
            schedule: deleted.schedule.into(),
            deleted_sessions: deleted.deleted_sessions,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkDeleteResponse {
    pub deleted_schedules: u64,
    pub deleted_sessions: u64,
    pub class_names: Vec<String>,
}

impl From<BulkDeleteSummary> for BulkDeleteResponse {
    fn from(summary: BulkDeleteSummary) -> Self {
        Self {
            deleted_schedules: summary.deleted_schedules,
            deleted_sessions: summary.deleted_sessions,
            class_names: summary.class_names,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherResponse {
    pub id: Uuid,
    pub name: String,
    /// `MAIN_TEACHER` or `ASSISTANT_TEACHER`
    pub role: String,
}

impl From<AssignedTeacher> for TeacherResponse {
    fn from(assigned: AssignedTeacher) -> Self {
        Self {
            id: assigned.teacher.id,
            name: assigned.teacher.name,
            role: assigned.role.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<classes::Model> for ClassResponse {
    fn from(class: classes::Model) -> Self {
        Self {
            id: class.id,
            name: class.name,
        }
    }
}

/// A schedule on the requested day with its class, teachers and sessions
#[derive(Debug, Serialize, ToSchema)]
pub struct ScheduleDetailResponse {
    #[serde(flatten)]
    pub schedule: ScheduleResponse,
    pub class: ClassResponse,
    pub teachers: Vec<TeacherResponse>,
    pub sessions: Vec<ClassSessionResponse>,
}

impl From<ScheduleDetail> for ScheduleDetailResponse {
    fn from(detail: ScheduleDetail) -> Self {
        Self {
            schedule: detail.schedule.into(),
            class: detail.class.into(),
            teachers: detail.teachers.into_iter().map(Into::into).collect(),
            sessions: detail.sessions.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnnotatedScheduleResponse {
    #[serde(flatten)]
    pub schedule: ScheduleResponse,
    pub class_name: String,
    pub teachers: Vec<TeacherResponse>,
}

impl From<AnnotatedSchedule> for AnnotatedScheduleResponse {
    fn from(annotated: AnnotatedSchedule) -> Self {
        Self {
            schedule: annotated.schedule.into(),
            class_name: annotated.class_name,
            teachers: annotated.teachers.into_iter().map(Into::into).collect(),
        }
    }
}

/// Plain schedules for a class lookup, detailed schedules for a day lookup
#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum ScheduleQueryResponse {
    ByClass(Vec<ScheduleResponse>),
    ByDay(Vec<ScheduleDetailResponse>),
}

impl From<ScheduleLookup> for ScheduleQueryResponse {
    fn from(lookup: ScheduleLookup) -> Self {
        match lookup {
            ScheduleLookup::ByClass(found) => {
                Self::ByClass(found.into_iter().map(Into::into).collect())
            }
            ScheduleLookup::ByDay(found) => Self::ByDay(found.into_iter().map(Into::into).collect()),
        }
    }
}
