use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use contracts::system::profiles::{
    ChangePasswordDto, CreateProfileDto, Profile, RepStats, UpdateProfileDto, UserRole,
};
use serde::Deserialize;
use serde_json::json;

use crate::system::auth::extractor::CurrentUser;
use crate::system::profiles::service;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub role: Option<String>,
}

/// GET /api/system/profiles[?role=rep]
pub async fn list(Query(query): Query<ListQuery>) -> Result<Json<Vec<Profile>>, StatusCode> {
    let role = match query.role.as_deref() {
        Some(code) => Some(UserRole::from_code(code).ok_or(StatusCode::BAD_REQUEST)?),
        None => None,
    };
    match service::list_all(role).await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/system/profiles/rep-stats
pub async fn rep_stats() -> Result<Json<Vec<RepStats>>, StatusCode> {
    match service::list_rep_stats().await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/system/profiles (admin creates reps)
pub async fn create(
    Json(dto): Json<CreateProfileDto>,
) -> Result<Json<serde_json::Value>, StatusCode> {
    match service::create(dto, UserRole::Rep).await {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(_) => Err(StatusCode::BAD_REQUEST),
    }
}

/// GET /api/system/profiles/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<Profile>, StatusCode> {
    match service::get_by_id(&id).await {
        Ok(Some(p)) => Ok(Json(p)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// PUT /api/system/profiles/:id
pub async fn update(
    Path(id): Path<String>,
    Json(mut dto): Json<UpdateProfileDto>,
) -> Result<StatusCode, StatusCode> {
    dto.id = id;
    match service::update(dto).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// DELETE /api/system/profiles/:id
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, StatusCode> {
    match service::delete(&id).await {
        Ok(true) => Ok(StatusCode::OK),
        Ok(false) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/system/profiles/:id/change-password
///
/// Self-or-admin rules are enforced by the service.
pub async fn change_password(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(mut dto): Json<ChangePasswordDto>,
) -> Result<StatusCode, StatusCode> {
    dto.profile_id = id;
    match service::change_password(dto, &claims.sub).await {
        Ok(()) => Ok(StatusCode::OK),
        Err(_) => Err(StatusCode::FORBIDDEN),
    }
}
