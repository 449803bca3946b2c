//! HTTP application wiring (Axum router).
//!
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{middleware::from_fn, routing::get, Extension, Router};
use tower::ServiceBuilder;

use rolegate_auth::RoleRegistry;

use crate::{GuardOptions, middleware};

pub mod errors;
pub mod routes;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// `deny` controls the status/message every guarded route answers with.
pub fn build_app(registry: Arc<RoleRegistry>, deny: GuardOptions) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router(Arc::clone(&registry), &deny))
        .layer(
            ServiceBuilder::new()
                .layer(Extension(registry))
                .layer(from_fn(middleware::header_identity)),
        )
}
