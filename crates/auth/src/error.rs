//! Configuration-boundary errors.
//!
//! Authorization decisions never fail; only loading role definitions can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid role definitions: {0}")]
    InvalidDefinitions(#[from] serde_json::Error),

    #[error("role name must not be blank")]
    BlankRoleName,
}
