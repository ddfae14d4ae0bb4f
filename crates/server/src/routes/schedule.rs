use crate::{
    auth::CurrentUser,
    dtos::schedule::{
        AnnotatedScheduleResponse, BulkCreateRequest, BulkDeleteRequest, BulkDeleteResponse,
        ClassOrDayRequest, CreateScheduleRequest, CreatedScheduleResponse,
        DeletedScheduleResponse, MultipleClassesRequest, ScheduleQueryResponse, ScheduleResponse,
        UpdateScheduleRequest, UpdatedScheduleResponse,
    },
    error::{ApiError, ErrorBody},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use database::services::{BulkSchedules, ScheduleQueries, Schedules};
use uuid::Uuid;

/// Create a schedule and its class session
#[utoipa::path(
    post,
    path = "/schedule",
    request_body = CreateScheduleRequest,
    responses(
        (status = 201, description = "Schedule and session created", body = CreatedScheduleResponse),
        (status = 400, description = "Missing or malformed fields", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
        (status = 404, description = "Class or main teacher not found", body = ErrorBody),
        (status = 409, description = "Overlaps an existing schedule", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Schedules"
)]
pub async fn create_schedule(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Json(req): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<CreatedScheduleResponse>), ApiError> {
    let created = Schedules::create_schedule(&state.db, &actor, req.into()).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Get a schedule by ID
#[utoipa::path(
    get,
    path = "/schedule/{id}",
    params(
        ("id" = Uuid, Path, description = "Schedule ID")
    ),
    responses(
        (status = 200, description = "Schedule found", body = ScheduleResponse),
        (status = 404, description = "Schedule not found", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Schedules"
)]
pub async fn get_schedule(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ScheduleResponse>, ApiError> {
    let schedule = ScheduleQueries::get_by_id(&state.db, id).await?;
    Ok(Json(schedule.into()))
}

/// Update a schedule; its sessions follow the new values
#[utoipa::path(
    put,
    path = "/schedule/{id}",
    params(
        ("id" = Uuid, Path, description = "Schedule ID")
    ),
    request_body = UpdateScheduleRequest,
    responses(
        (status = 200, description = "Schedule updated", body = UpdatedScheduleResponse),
        (status = 400, description = "No fields, malformed fields or start after end", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
        (status = 404, description = "Schedule or class not found", body = ErrorBody),
        (status = 409, description = "Overlaps an existing schedule", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Schedules"
)]
pub async fn update_schedule(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateScheduleRequest>,
) -> Result<Json<UpdatedScheduleResponse>, ApiError> {
    let updated = Schedules::update_schedule(&state.db, &actor, id, req.into()).await?;
    Ok(Json(updated.into()))
}

/// Delete a schedule and the sessions derived from it
#[utoipa::path(
    delete,
    path = "/schedule/{id}",
    params(
        ("id" = Uuid, Path, description = "Schedule ID")
    ),
    responses(
        (status = 200, description = "Schedule deleted", body = DeletedScheduleResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
        (status = 404, description = "Schedule not found", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Schedules"
)]
pub async fn delete_schedule(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedScheduleResponse>, ApiError> {
    let deleted = Schedules::delete_schedule(&state.db, &actor, id).await?;
    Ok(Json(deleted.into()))
}

/// Create several schedules at once; either all are created or none
#[utoipa::path(
    post,
    path = "/schedule/bulk-create",
    request_body = BulkCreateRequest,
    responses(
        (status = 201, description = "All schedules created", body = [CreatedScheduleResponse]),
        (status = 400, description = "Empty batch or invalid item", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
        (status = 409, description = "Items overlap each other or a stored schedule", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Schedules"
)]
pub async fn bulk_create(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Json(req): Json<BulkCreateRequest>,
) -> Result<(StatusCode, Json<Vec<CreatedScheduleResponse>>), ApiError> {
    let inputs = req.schedules.into_iter().map(Into::into).collect();
    let created = BulkSchedules::bulk_create(&state.db, &actor, inputs).await?;

    Ok((
        StatusCode::CREATED,
        Json(created.into_iter().map(Into::into).collect()),
    ))
}

/// Delete several schedules and their sessions at once
#[utoipa::path(
    post,
    path = "/schedule/bulk-delete",
    request_body = BulkDeleteRequest,
    responses(
        (status = 200, description = "Schedules deleted", body = BulkDeleteResponse),
        (status = 400, description = "No ids given", body = ErrorBody),
        (status = 403, description = "Caller is not an admin", body = ErrorBody),
        (status = 404, description = "Some ids do not exist; nothing was deleted", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Schedules"
)]
pub async fn bulk_delete(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Json(req): Json<BulkDeleteRequest>,
) -> Result<Json<BulkDeleteResponse>, ApiError> {
    let summary = BulkSchedules::bulk_delete(&state.db, &actor, req.ids).await?;
    Ok(Json(summary.into()))
}

/// Find schedules by class (optionally on one day) or by day
#[utoipa::path(
    post,
    path = "/schedule/get-by-class-or-day",
    request_body = ClassOrDayRequest,
    responses(
        (status = 200, description = "Matching schedules", body = ScheduleQueryResponse),
        (status = 400, description = "Neither filter given, or malformed day", body = ErrorBody),
        (status = 404, description = "Class not found", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Schedules"
)]
pub async fn get_by_class_or_day(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(req): Json<ClassOrDayRequest>,
) -> Result<Json<ScheduleQueryResponse>, ApiError> {
    let lookup =
        ScheduleQueries::get_by_class_or_day(&state.db, req.class_id, req.day.as_deref()).await?;
    Ok(Json(lookup.into()))
}

/// Find the schedules of several classes
#[utoipa::path(
    post,
    path = "/schedule/get-by-multiple-classes",
    request_body = MultipleClassesRequest,
    responses(
        (status = 200, description = "Matching schedules", body = [ScheduleResponse]),
        (status = 400, description = "No class ids given", body = ErrorBody),
        (status = 404, description = "No schedules for these classes", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Schedules"
)]
pub async fn get_by_multiple_classes(
    State(state): State<AppState>,
    _user: CurrentUser,
    Json(req): Json<MultipleClassesRequest>,
) -> Result<Json<Vec<ScheduleResponse>>, ApiError> {
    let schedules = ScheduleQueries::get_by_classes(&state.db, req.class_ids).await?;
    Ok(Json(schedules.into_iter().map(Into::into).collect()))
}

/// Schedules of every class a student is enrolled in
#[utoipa::path(
    get,
    path = "/schedule/student/{id}",
    params(
        ("id" = Uuid, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "The student's schedules", body = [AnnotatedScheduleResponse]),
        (status = 404, description = "Student not found", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Schedules"
)]
pub async fn get_by_student(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AnnotatedScheduleResponse>>, ApiError> {
    let schedules = ScheduleQueries::get_by_student(&state.db, id).await?;
    Ok(Json(schedules.into_iter().map(Into::into).collect()))
}

/// Schedules of every class a teacher is assigned to
#[utoipa::path(
    get,
    path = "/schedule/teacher/{id}",
    params(
        ("id" = Uuid, Path, description = "Teacher ID")
    ),
    responses(
        (status = 200, description = "The teacher's schedules", body = [AnnotatedScheduleResponse]),
        (status = 404, description = "Teacher not found", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Schedules"
)]
pub async fn get_by_teacher(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AnnotatedScheduleResponse>>, ApiError> {
    let schedules = ScheduleQueries::get_by_teacher(&state.db, id).await?;
    Ok(Json(schedules.into_iter().map(Into::into).collect()))
}
