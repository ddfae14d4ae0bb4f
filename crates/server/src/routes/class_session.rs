use crate::{
    auth::CurrentUser,
    dtos::class_session::{ClassSessionResponse, UpdateStatusRequest},
    error::{ApiError, ErrorBody},
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use database::services::class_session::ClassSessionService;
use uuid::Uuid;

/// Get a class session by ID
#[utoipa::path(
    get,
    path = "/class-session/{id}",
    params(
        ("id" = Uuid, Path, description = "Class session ID")
    ),
    responses(
        (status = 200, description = "Session found", body = ClassSessionResponse),
        (status = 404, description = "Session not found", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Class Sessions"
)]
pub async fn get_session(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ClassSessionResponse>, ApiError> {
    let session = ClassSessionService::get_session(&state.db, id).await?;
    Ok(Json(session.into()))
}

/// Mark a session scheduled, completed or cancelled
#[utoipa::path(
    put,
    path = "/class-session/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Class session ID")
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = ClassSessionResponse),
        (status = 400, description = "Cancelled without a reason", body = ErrorBody),
        (status = 403, description = "Caller is not an admin or teacher", body = ErrorBody),
        (status = 404, description = "Session not found", body = ErrorBody)
    ),
    security(
        ("jwt" = [])
    ),
    tag = "Class Sessions"
)]
pub async fn update_status(
    State(state): State<AppState>,
    CurrentUser(actor): CurrentUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ClassSessionResponse>, ApiError> {
    let session =
        ClassSessionService::update_status(&state.db, &actor, id, req.status, req.cancel_reason)
            .await?;
    Ok(Json(session.into()))
}
