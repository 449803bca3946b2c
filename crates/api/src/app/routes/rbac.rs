//! RBAC inspection endpoints for "why was this request denied?" debugging.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use rolegate_auth::{RoleRegistry, UserContext, explain};

use crate::app::errors;
use crate::{GuardOptions, PermissionGuard, permission_guard};

/// Permissions that unlock the registry listing.
const INSPECT_PERMISSIONS: [&str; 2] = ["rbac.read", "admin.rbac.read"];

#[derive(Debug, Deserialize)]
pub struct ExplainQuery {
    pub permission: String,
}

pub fn router(registry: Arc<RoleRegistry>, deny: &GuardOptions) -> Router {
    let inspect = PermissionGuard::require_any(registry, INSPECT_PERMISSIONS)
        .with_options(deny.clone());

    Router::new()
        .route("/roles", get(list_roles))
        .route("/roles/:name", get(get_role))
        .route_layer(from_fn_with_state(inspect, permission_guard))
}

/// GET /admin/rbac/roles - Every registered role and its permissions.
pub async fn list_roles(Extension(registry): Extension<Arc<RoleRegistry>>) -> axum::response::Response {
    let roles: Vec<_> = registry
        .role_names()
        .into_iter()
        .map(|name| {
            serde_json::json!({
                "name": name,
                "permissions": registry.permissions(name.as_str()),
            })
        })
        .collect();

    (StatusCode::OK, Json(serde_json::json!({ "roles": roles }))).into_response()
}

/// GET /admin/rbac/roles/:name
pub async fn get_role(
    Extension(registry): Extension<Arc<RoleRegistry>>,
    Path(name): Path<String>,
) -> axum::response::Response {
    if !registry.has_role(&name) {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "role not found");
    }

    let role = serde_json::json!({
        "name": name,
        "permissions": registry.permissions(&name),
    });
    (StatusCode::OK, Json(serde_json::json!({ "role": role }))).into_response()
}

/// GET /explain?permission=X - Why the current user can/cannot do X.
///
/// Open to anyone: an anonymous caller gets an explanation with denial `no_user`.
pub async fn explain_permission(
    Extension(registry): Extension<Arc<RoleRegistry>>,
    user: Option<Extension<UserContext>>,
    Query(query): Query<ExplainQuery>,
) -> axum::response::Response {
    let user = user.map(|Extension(user)| user);
    let explanation = explain(user.as_ref(), &query.permission, &registry);

    (StatusCode::OK, Json(serde_json::json!({ "explanation": explanation }))).into_response()
}
