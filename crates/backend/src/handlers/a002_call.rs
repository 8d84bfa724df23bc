use axum::extract::Path;
use axum::Json;
use serde_json::json;

use crate::domain::a002_call;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/call/today
pub async fn today(
    CurrentUser(claims): CurrentUser,
) -> Result<Json<Vec<contracts::domain::a002_call::aggregate::Call>>, axum::http::StatusCode> {
    match a002_call::service::today(&claims.sub).await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/call/my
pub async fn list_my(
    CurrentUser(claims): CurrentUser,
) -> Result<Json<Vec<contracts::domain::a002_call::aggregate::Call>>, axum::http::StatusCode> {
    match a002_call::service::list_my(&claims.sub).await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/call/previous/:client_id
///
/// Последний завершённый визит к клиенту; 404, если визитов не было.
pub async fn previous_visit(
    Path(client_id): Path<String>,
) -> Result<Json<contracts::domain::a002_call::aggregate::Call>, axum::http::StatusCode> {
    match a002_call::service::previous_visit(&client_id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/call (админ планирует визит)
pub async fn schedule(
    Json(dto): Json<contracts::domain::a002_call::aggregate::CallDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match a002_call::service::schedule(dto).await {
        Ok(id) => Ok(Json(json!({"id": id.to_string()}))),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// PUT /api/call/:id/log
pub async fn log_visit(
    CurrentUser(claims): CurrentUser,
    Path(id): Path<String>,
    Json(dto): Json<contracts::domain::a002_call::aggregate::CompleteCallDto>,
) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a002_call::service::log_visit(uuid, &claims.sub, dto).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::warn!("Log visit failed: {}", e);
            Err(axum::http::StatusCode::FORBIDDEN)
        }
    }
}

/// POST /api/call/visit (внеплановый визит)
pub async fn log_adhoc_visit(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<contracts::domain::a002_call::aggregate::AdHocVisitDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let complete = contracts::domain::a002_call::aggregate::CompleteCallDto {
        outcomes: dto.outcomes,
        notes: dto.notes,
        duration_minutes: dto.duration_minutes,
    };
    match a002_call::service::log_adhoc_visit(&claims.sub, &dto.client_id, complete).await {
        Ok(id) => Ok(Json(json!({"id": id.to_string()}))),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}
