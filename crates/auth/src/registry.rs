//! Immutable role registry (role name -> permission set).

use std::collections::BTreeMap;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Permission, RegistryError, Role};

/// Caller-supplied role definitions, typically deserialized from JSON.
///
/// A `None` entry (`null` in JSON) marks a role that is declared but
/// undefined; such entries are skipped when the registry is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleDefinitions(BTreeMap<String, Option<Vec<String>>>);

impl RoleDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with_role<I, S>(mut self, role: impl Into<String>, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(role, Some(permissions.into_iter().map(Into::into).collect()));
        self
    }

    pub fn insert(&mut self, role: impl Into<String>, permissions: Option<Vec<String>>) {
        self.0.insert(role.into(), permissions);
    }

    /// Mutable access to a role's permission list.
    pub fn get_mut(&mut self, role: &str) -> Option<&mut Vec<String>> {
        self.0.get_mut(role).and_then(Option::as_mut)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse definitions from JSON text the caller has already loaded.
    ///
    /// Blank role names are rejected here because they can never be
    /// referenced meaningfully.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let definitions: Self = serde_json::from_str(json)?;
        if definitions.0.keys().any(|name| name.trim().is_empty()) {
            return Err(RegistryError::BlankRoleName);
        }
        Ok(definitions)
    }
}

impl<R, P, S> FromIterator<(R, P)> for RoleDefinitions
where
    R: Into<String>,
    P: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (R, P)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::new(), |defs, (role, perms)| defs.with_role(role, perms))
    }
}

/// Immutable mapping from role name to permissions.
///
/// # Invariants
/// - Contents never change after construction (no mutating API exists).
/// - Unknown roles resolve to an empty permission slice, never an error.
/// - Each role's permissions are de-duplicated, first occurrence wins.
///
/// Share it by reference (usually `Arc<RoleRegistry>`) for the lifetime of
/// the process; rebuild a new one when roles change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleRegistry {
    roles: BTreeMap<Role, Box<[Permission]>>,
}

impl RoleRegistry {
    /// A registry with zero roles: the deny-all baseline.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a registry from definitions, copying every permission list.
    pub fn build(definitions: &RoleDefinitions) -> Self {
        let mut roles = BTreeMap::new();

        for (name, permissions) in &definitions.0 {
            let Some(permissions) = permissions else {
                tracing::trace!(role = %name, "skipping undefined role");
                continue;
            };

            let mut seen = HashSet::with_capacity(permissions.len());
            let unique: Box<[Permission]> = permissions
                .iter()
                .filter(|p| seen.insert(p.as_str()))
                .map(|p| Permission::new(p.clone()))
                .collect();

            roles.insert(Role::new(name.clone()), unique);
        }

        tracing::debug!(roles = roles.len(), "role registry built");
        Self { roles }
    }

    /// Parse JSON role definitions and build a registry from them.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        Ok(Self::build(&RoleDefinitions::from_json(json)?))
    }

    /// Permissions granted by `role`; empty when the role is unknown.
    pub fn permissions(&self, role: &str) -> &[Permission] {
        self.roles.get(role).map(|p| &p[..]).unwrap_or(&[])
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains_key(role)
    }

    /// All registered role names, sorted.
    pub fn role_names(&self) -> Vec<&Role> {
        self.roles.keys().collect()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Build an immutable registry from role definitions.
pub fn build_registry(definitions: &RoleDefinitions) -> RoleRegistry {
    RoleRegistry::build(definitions)
}
