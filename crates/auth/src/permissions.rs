use std::borrow::{Borrow, Cow};

use serde::{Deserialize, Serialize};

/// The global wildcard: grants every permission.
pub const WILDCARD: &str = "*";

/// Suffix that turns a namespace into a namespace wildcard (`"report.*"`).
pub const NAMESPACE_WILDCARD_SUFFIX: &str = ".*";

/// Permission identifier.
///
/// Permissions are dot-delimited strings (e.g. "user.update"). Two wildcard
/// forms are understood by the engine, and only as the final segment of a
/// *granted* permission:
/// - `"*"` grants everything;
/// - `"<namespace>.*"` grants every permission below that namespace.
///
/// Comparison is literal and case-sensitive. Nothing is validated on
/// construction; a malformed string simply never matches anything useful.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == WILDCARD
    }

    /// True for `"<namespace>.*"` forms (not the bare global wildcard).
    pub fn is_namespace_wildcard(&self) -> bool {
        self.as_str().len() > NAMESPACE_WILDCARD_SUFFIX.len()
            && self.as_str().ends_with(NAMESPACE_WILDCARD_SUFFIX)
    }

    /// Empty or whitespace-only permissions are never granted.
    pub fn is_blank(&self) -> bool {
        is_blank(self.as_str())
    }
}

pub(crate) fn is_blank(permission: &str) -> bool {
    permission.trim().is_empty()
}

/// Namespace wildcards that would grant `requested`, shortest first.
///
/// `"report.admin.export"` yields `"report.*"` then `"report.admin.*"`. The
/// full string itself never produces a candidate, so `"report.*"` does not
/// grant the bare `"report"`.
pub(crate) fn namespace_wildcards(requested: &str) -> impl Iterator<Item = String> + '_ {
    requested
        .match_indices('.')
        .map(move |(idx, _)| format!("{}{}", &requested[..idx], NAMESPACE_WILDCARD_SUFFIX))
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Permission {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for Permission {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<&'static str> for Permission {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Permission {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
