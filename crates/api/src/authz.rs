//! Route-level permission guard.
//!
//! A guard owns a requirement fixed at registration time and rejects requests
//! whose user does not satisfy it. Attach it per route:
//!
//! ```ignore
//! let guard = PermissionGuard::require(registry, "report.read");
//! get(handler).route_layer(axum::middleware::from_fn_with_state(guard, permission_guard))
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use rolegate_auth::{Permission, Requirement, RoleRegistry};

use crate::app::errors;
use crate::context::{UserExtractor, extension_extractor};

/// How a denial is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardOptions {
    pub status: StatusCode,
    pub message: String,
}

impl Default for GuardOptions {
    fn default() -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: "Forbidden".to_string(),
        }
    }
}

impl GuardOptions {
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

#[derive(Clone)]
pub struct PermissionGuard {
    registry: Arc<RoleRegistry>,
    requirement: Requirement,
    options: GuardOptions,
    extractor: UserExtractor,
}

impl PermissionGuard {
    pub fn new(registry: Arc<RoleRegistry>, requirement: Requirement) -> Self {
        Self {
            registry,
            requirement,
            options: GuardOptions::default(),
            extractor: extension_extractor(),
        }
    }

    pub fn require(registry: Arc<RoleRegistry>, permission: impl Into<Permission>) -> Self {
        Self::new(registry, Requirement::one(permission))
    }

    pub fn require_all<I, P>(registry: Arc<RoleRegistry>, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        Self::new(registry, Requirement::all(permissions))
    }

    pub fn require_any<I, P>(registry: Arc<RoleRegistry>, permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        Self::new(registry, Requirement::any(permissions))
    }

    pub fn with_options(mut self, options: GuardOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the default extension-based user lookup.
    pub fn with_extractor(mut self, extractor: UserExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    pub fn options(&self) -> &GuardOptions {
        &self.options
    }

    /// Would this request be let through?
    pub fn allows(&self, req: &Request) -> bool {
        let user = (self.extractor)(req);
        self.requirement.evaluate(user.as_ref(), &self.registry)
    }
}

impl core::fmt::Debug for PermissionGuard {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PermissionGuard")
            .field("requirement", &self.requirement)
            .field("options", &self.options)
            .field("roles", &self.registry.len())
            .finish_non_exhaustive()
    }
}

/// Middleware: continue only when the guard's requirement is satisfied.
pub async fn permission_guard(
    State(guard): State<PermissionGuard>,
    req: Request,
    next: Next,
) -> Response {
    if guard.allows(&req) {
        return next.run(req).await;
    }

    tracing::debug!(
        method = %req.method(),
        path = %req.uri().path(),
        requirement = %guard.requirement,
        status = guard.options.status.as_u16(),
        "request denied"
    );

    errors::json_error(guard.options.status, "forbidden", guard.options.message.clone())
}
