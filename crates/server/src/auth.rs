use crate::error::ApiError;
use axum::{extract::FromRequestParts, http::request::Parts};
use database::services::actor::Actor;
use models::role::Role;
use serde::Deserialize;

/// The JWT claims this service reads; validation is done by the resource server layer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessClaims {
    pub sub: Option<String>,
    pub role: Option<String>,
}

/// The authenticated caller, taken from the validated access token
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Actor);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = parts
            .extensions
            .get::<AccessClaims>()
            .ok_or_else(|| ApiError::unauthorized("Missing access token"))?;

        actor_from_claims(claims).map(CurrentUser)
    }
}

/// Builds the acting user; an unknown or absent role leaves the actor without one
pub fn actor_from_claims(claims: &AccessClaims) -> Result<Actor, ApiError> {
    let sub = claims
        .sub
        .as_deref()
        .filter(|sub| !sub.is_empty())
        .ok_or_else(|| ApiError::unauthorized("Access token has no subject"))?;

    let role = claims
        .role
        .as_deref()
        .and_then(|role| role.trim().parse::<Role>().ok());

    Ok(Actor::new(sub, role))
}
