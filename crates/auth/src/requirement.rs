use serde::{Deserialize, Serialize};

use crate::{Permission, RoleRegistry, UserContext, can_user, can_user_all, can_user_any};

/// A permission requirement fixed at registration time (route, view, command).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    One(Permission),
    All(Vec<Permission>),
    Any(Vec<Permission>),
}

impl Requirement {
    pub fn one(permission: impl Into<Permission>) -> Self {
        Self::One(permission.into())
    }

    pub fn all<I, P>(permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        Self::All(permissions.into_iter().map(Into::into).collect())
    }

    pub fn any<I, P>(permissions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        Self::Any(permissions.into_iter().map(Into::into).collect())
    }

    /// A list requirement whose combinator is picked by a flag.
    pub fn list<I, P>(permissions: I, require_all: bool) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Permission>,
    {
        if require_all {
            Self::all(permissions)
        } else {
            Self::any(permissions)
        }
    }

    pub fn evaluate(&self, user: Option<&UserContext>, registry: &RoleRegistry) -> bool {
        match self {
            Requirement::One(p) => can_user(user, p.as_str(), registry),
            Requirement::All(ps) => can_user_all(user, ps, registry),
            Requirement::Any(ps) => can_user_any(user, ps, registry),
        }
    }
}

impl core::fmt::Display for Requirement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let join = |ps: &[Permission], sep: &str| {
            ps.iter().map(Permission::as_str).collect::<Vec<_>>().join(sep)
        };
        match self {
            Requirement::One(p) => write!(f, "{p}"),
            Requirement::All(ps) => write!(f, "all({})", join(ps.as_slice(), ", ")),
            Requirement::Any(ps) => write!(f, "any({})", join(ps.as_slice(), ", ")),
        }
    }
}
