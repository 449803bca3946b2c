//! Sample guarded resource: one route per requirement shape.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use rolegate_auth::RoleRegistry;

use crate::{GuardOptions, PermissionGuard, permission_guard};

pub fn router(registry: Arc<RoleRegistry>, deny: &GuardOptions) -> Router {
    let read = PermissionGuard::require(Arc::clone(&registry), "report.read")
        .with_options(deny.clone());
    let export = PermissionGuard::require_all(registry, ["report.read", "report.export"])
        .with_options(deny.clone());

    Router::new()
        .route(
            "/",
            get(list_reports).route_layer(from_fn_with_state(read, permission_guard)),
        )
        .route(
            "/export",
            post(export_reports).route_layer(from_fn_with_state(export, permission_guard)),
        )
}

/// GET /reports
pub async fn list_reports() -> axum::response::Response {
    Json(serde_json::json!({
        "reports": [
            { "id": "q1-revenue", "title": "Q1 revenue" },
            { "id": "q1-churn", "title": "Q1 churn" },
        ]
    }))
    .into_response()
}

/// POST /reports/export
pub async fn export_reports() -> axum::response::Response {
    (StatusCode::ACCEPTED, Json(serde_json::json!({ "status": "queued" }))).into_response()
}
