//! `rolegate-auth` — pure, fail-closed RBAC decision engine.
//!
//! This crate is intentionally decoupled from HTTP, storage, and identity
//! verification: callers hand in an already-authenticated [`UserContext`]
//! and a [`RoleRegistry`] built once at startup.

pub mod authorize;
pub mod error;
pub mod gate;
pub mod permissions;
pub mod registry;
pub mod requirement;
pub mod roles;
pub mod scope;
pub mod user;

pub use authorize::{
    DenialKind, Explanation, PermissionCheckResult, can_user, can_user_all, can_user_any,
    check_permission, effective_permissions, explain,
};
pub use error::RegistryError;
pub use gate::Gate;
pub use permissions::Permission;
pub use registry::{RoleDefinitions, RoleRegistry, build_registry};
pub use requirement::Requirement;
pub use roles::Role;
pub use scope::PermissionScope;
pub use user::UserContext;
