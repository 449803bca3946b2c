//! HTTP adapter: permission guards, identity plumbing, and a demo router.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod middleware;

pub use authz::{GuardOptions, PermissionGuard, permission_guard};
pub use config::{Config, ConfigError};
pub use context::UserExtractor;
