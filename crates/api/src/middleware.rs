use axum::{extract::Request, middleware::Next, response::Response};

use crate::context::user_from_headers;

/// Development identity layer: turns `x-user-*` headers into a `UserContext`
/// request extension. Requests without those headers pass through anonymous.
///
/// Put a real authentication layer in its place in production.
pub async fn header_identity(mut req: Request, next: Next) -> Response {
    if let Some(user) = user_from_headers(req.headers()) {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
