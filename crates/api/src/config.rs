//! Process configuration for the `rolegate-api` binary (environment-driven).

use std::net::SocketAddr;

use axum::http::StatusCode;
use thiserror::Error;

use rolegate_auth::{RegistryError, RoleDefinitions};

use crate::GuardOptions;

pub const ADDR_VAR: &str = "ROLEGATE_ADDR";
pub const ROLES_VAR: &str = "ROLEGATE_ROLES";
pub const DENY_STATUS_VAR: &str = "ROLEGATE_DENY_STATUS";
pub const DENY_MESSAGE_VAR: &str = "ROLEGATE_DENY_MESSAGE";

const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("ROLEGATE_ADDR: invalid socket address '{0}'")]
    InvalidAddr(String),

    #[error("ROLEGATE_DENY_STATUS: invalid HTTP status '{0}'")]
    InvalidStatus(String),

    #[error("ROLEGATE_ROLES: {0}")]
    Roles(#[from] RegistryError),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    /// Empty when `ROLEGATE_ROLES` is unset: every guarded route denies.
    pub roles: RoleDefinitions,
    pub deny: GuardOptions,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let addr_raw = lookup(ADDR_VAR).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr: SocketAddr = addr_raw
            .parse()
            .map_err(|_| ConfigError::InvalidAddr(addr_raw.clone()))?;

        let roles = match lookup(ROLES_VAR) {
            Some(json) => RoleDefinitions::from_json(&json)?,
            None => RoleDefinitions::new(),
        };

        let mut deny = GuardOptions::default();
        if let Some(raw) = lookup(DENY_STATUS_VAR) {
            let status = raw
                .trim()
                .parse::<u16>()
                .ok()
                .and_then(|code| StatusCode::from_u16(code).ok())
                .ok_or_else(|| ConfigError::InvalidStatus(raw.clone()))?;
            deny = deny.with_status(status);
        }
        if let Some(message) = lookup(DENY_MESSAGE_VAR) {
            deny = deny.with_message(message);
        }

        Ok(Self { addr, roles, deny })
    }
}
