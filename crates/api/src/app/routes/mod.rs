use std::sync::Arc;

use axum::{routing::get, Router};

use rolegate_auth::RoleRegistry;

use crate::GuardOptions;

pub mod rbac;
pub mod reports;
pub mod system;

/// Router for every endpoint that sees the request's user.
pub fn router(registry: Arc<RoleRegistry>, deny: &GuardOptions) -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/explain", get(rbac::explain_permission))
        .nest("/reports", reports::router(Arc::clone(&registry), deny))
        .nest("/admin/rbac", rbac::router(registry, deny))
}
