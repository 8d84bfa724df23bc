use axum::extract::{Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::domain::a001_client;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/client
pub async fn list_all(
) -> Result<Json<Vec<contracts::domain::a001_client::aggregate::Client>>, axum::http::StatusCode> {
    match a001_client::service::list_all().await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[derive(Debug, Deserialize)]
pub struct MyClientsQuery {
    pub search: Option<String>,
}

/// GET /api/client/my?search=...
pub async fn list_my(
    CurrentUser(claims): CurrentUser,
    Query(query): Query<MyClientsQuery>,
) -> Result<Json<Vec<contracts::domain::a001_client::aggregate::Client>>, axum::http::StatusCode> {
    match a001_client::service::list_my(&claims.sub, query.search.as_deref()).await {
        Ok(v) => Ok(Json(v)),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// GET /api/client/:id
pub async fn get_by_id(
    Path(id): Path<String>,
) -> Result<Json<contracts::domain::a001_client::aggregate::Client>, axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a001_client::service::get_by_id(uuid).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/client
pub async fn upsert(
    Json(dto): Json<contracts::domain::a001_client::aggregate::ClientDto>,
) -> Result<Json<serde_json::Value>, axum::http::StatusCode> {
    let result = if dto.id.is_some() {
        a001_client::service::update(dto)
            .await
            .map(|_| uuid::Uuid::nil().to_string())
    } else {
        a001_client::service::create(dto)
            .await
            .map(|id| id.to_string())
    };
    match result {
        Ok(id) => Ok(Json(json!({"id": id}))),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// DELETE /api/client/:id
pub async fn delete(Path(id): Path<String>) -> Result<(), axum::http::StatusCode> {
    let uuid = match uuid::Uuid::parse_str(&id) {
        Ok(uuid) => uuid,
        Err(_) => return Err(axum::http::StatusCode::BAD_REQUEST),
    };
    match a001_client::service::delete(uuid).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(axum::http::StatusCode::NOT_FOUND),
        Err(_) => Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR),
    }
}

/// POST /api/client/import-csv
///
/// Тело запроса — сырой CSV. Ошибки валидации строк не являются
/// ошибкой HTTP: ответ всегда 200 с перечнем ошибок.
pub async fn import_csv(
    body: String,
) -> Result<Json<contracts::domain::a001_client::ClientImportResult>, axum::http::StatusCode> {
    match a001_client::service::import_csv(&body).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            tracing::error!("CSV import failed: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/client/import-template
pub async fn import_template() -> impl axum::response::IntoResponse {
    (
        [
            (axum::http::header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                axum::http::header::CONTENT_DISPOSITION,
                "attachment; filename=\"client_import_template.csv\"",
            ),
        ],
        contracts::domain::a001_client::CLIENT_CSV_TEMPLATE,
    )
}
