use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use rolegate_auth::{RoleRegistry, UserContext, effective_permissions};

use crate::app::errors;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// GET /whoami - The current user and everything they effectively hold.
pub async fn whoami(
    Extension(registry): Extension<Arc<RoleRegistry>>,
    user: Option<Extension<UserContext>>,
) -> axum::response::Response {
    let Some(Extension(user)) = user else {
        return errors::json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "no user context");
    };

    Json(serde_json::json!({
        "id": user.id,
        "roles": user.roles,
        "permissions": user.permissions,
        "effective_permissions": effective_permissions(&user, &registry),
    }))
    .into_response()
}
