use axum::Json;

use crate::dashboards::d400_admin_summary;

/// GET /api/dashboard/summary
pub async fn get_summary(
) -> Result<Json<contracts::dashboards::d400_admin_summary::AdminSummary>, axum::http::StatusCode> {
    match d400_admin_summary::service::get_summary().await {
        Ok(v) => Ok(Json(v)),
        Err(e) => {
            tracing::error!("Dashboard summary failed: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
