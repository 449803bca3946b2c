//! Explicit permission scope: a registry + user pair passed down to checks.
//!
//! Stands in for implicit context propagation. Whoever renders a view or
//! handles a request builds one scope and hands it to everything below.

use std::sync::Arc;

use crate::{
    PermissionCheckResult, RoleRegistry, UserContext, can_user, can_user_all, can_user_any,
    check_permission,
};

#[derive(Debug, Clone, Default)]
pub struct PermissionScope {
    registry: Arc<RoleRegistry>,
    user: Option<UserContext>,
}

impl PermissionScope {
    pub fn new(registry: Arc<RoleRegistry>, user: Option<UserContext>) -> Self {
        Self { registry, user }
    }

    /// Same registry, different user.
    pub fn with_user(&self, user: Option<UserContext>) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            user,
        }
    }

    pub fn registry(&self) -> &RoleRegistry {
        &self.registry
    }

    pub fn user(&self) -> Option<&UserContext> {
        self.user.as_ref()
    }

    pub fn can(&self, permission: &str) -> bool {
        can_user(self.user(), permission, &self.registry)
    }

    pub fn can_all<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
        can_user_all(self.user(), permissions, &self.registry)
    }

    pub fn can_any<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
        can_user_any(self.user(), permissions, &self.registry)
    }

    pub fn check(&self, permission: &str) -> PermissionCheckResult {
        check_permission(self.user(), permission, &self.registry)
    }
}
