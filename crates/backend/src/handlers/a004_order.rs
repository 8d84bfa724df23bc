use axum::extract::Path;
use axum::Json;
use serde_json::json;

use crate::domain::a004_order;
use crate::domain::a004_order::service::OrderError;
use crate::system::auth::extractor::CurrentUser;

/// POST /api/order
///
/// Пустая корзина — это ошибка клиента (422), а не сбой сервера.
pub async fn submit(
    CurrentUser(claims): CurrentUser,
    Json(dto): Json<contracts::domain::a004_order::aggregate::OrderDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    match a004_order::service::submit(&claims.sub, dto).await {
        Ok(id) => Ok(Json(json!({"id": id.to_string()}))),
        Err(e) if e.downcast_ref::<OrderError>().is_some() => {
            Err(axum::http::StatusCode::UNPROCESSABLE_ENTITY)
        }
        Err(e) => {
            tracing::error!("Order submit failed: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/order/my
pub async fn list_my(
    CurrentUser(claims): CurrentUser,
) -> Result<Json<Vec<contracts::domain::a004_order::aggregate::Order>>, axum::http::StatusCode> {
    match a004_order::service::list_my(&claims.sub).await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/order/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a004_order::aggregate::Order>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a004_order::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}
