pub mod class_session;
pub mod health;
pub mod schedule;

use crate::state::AppState;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Routes that require a validated access token
pub fn protected_router() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(schedule::create_schedule))
        .routes(routes!(
            schedule::get_schedule,
            schedule::update_schedule,
            schedule::delete_schedule
        ))
        .routes(routes!(schedule::bulk_create))
        .routes(routes!(schedule::bulk_delete))
        .routes(routes!(schedule::get_by_class_or_day))
        .routes(routes!(schedule::get_by_multiple_classes))
        .routes(routes!(schedule::get_by_student))
        .routes(routes!(schedule::get_by_teacher))
        .routes(routes!(class_session::get_session))
        .routes(routes!(class_session::update_status))
}
