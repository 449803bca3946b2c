//! Permission engine: pure, fail-closed decision functions.
//!
//! - No IO
//! - No panics
//! - No caching (every call recomputes the effective permission set)

use std::collections::{BTreeSet, HashSet};

use serde::Serialize;

use crate::permissions::{self, WILDCARD};
use crate::{RoleRegistry, UserContext};

/// Why a decision came out as "deny".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialKind {
    NoUser,
    BlankPermission,
    MissingPermission,
}

impl DenialKind {
    fn reason(self, permission: &str) -> String {
        match self {
            DenialKind::NoUser => "no user context".to_string(),
            DenialKind::BlankPermission => "requested permission is empty".to_string(),
            DenialKind::MissingPermission => format!("missing permission '{permission}'"),
        }
    }
}

/// Union of a user's direct permissions and the permissions of their roles.
///
/// Borrowed from the user and registry for the duration of one decision.
struct EffectivePermissions<'a> {
    grants: HashSet<&'a str>,
}

impl<'a> EffectivePermissions<'a> {
    fn collect(user: &'a UserContext, registry: &'a RoleRegistry) -> Self {
        let mut grants: HashSet<&'a str> = user.permissions.iter().map(|p| p.as_str()).collect();

        // Unknown roles resolve to an empty slice.
        for role in &user.roles {
            grants.extend(registry.permissions(role.as_str()).iter().map(|p| p.as_str()));
        }

        Self { grants }
    }

    /// The stored grant that satisfies `requested`, if any.
    ///
    /// Order: exact match, global wildcard, then namespace wildcards from the
    /// shortest prefix to the longest.
    fn grant_for(&self, requested: &str) -> Option<&'a str> {
        if let Some(grant) = self.grants.get(requested) {
            return Some(*grant);
        }
        if let Some(grant) = self.grants.get(WILDCARD) {
            return Some(*grant);
        }
        permissions::namespace_wildcards(requested)
            .find_map(|candidate| self.grants.get(candidate.as_str()).copied())
    }

    fn sorted(&self) -> Vec<String> {
        let mut list: Vec<String> = self.grants.iter().map(|g| g.to_string()).collect();
        list.sort();
        list
    }
}

fn decide<'a>(
    user: Option<&'a UserContext>,
    permission: &str,
    registry: &'a RoleRegistry,
) -> (Result<&'a str, DenialKind>, Option<EffectivePermissions<'a>>) {
    let Some(user) = user else {
        return (Err(DenialKind::NoUser), None);
    };
    if permissions::is_blank(permission) {
        return (Err(DenialKind::BlankPermission), None);
    }

    let effective = EffectivePermissions::collect(user, registry);
    let decision = effective.grant_for(permission).ok_or(DenialKind::MissingPermission);
    (decision, Some(effective))
}

fn decide_logged<'a>(
    user: Option<&'a UserContext>,
    permission: &str,
    registry: &'a RoleRegistry,
) -> (Result<&'a str, DenialKind>, Option<EffectivePermissions<'a>>) {
    let (decision, effective) = decide(user, permission, registry);
    if let Err(kind) = decision {
        tracing::trace!(permission, denial = ?kind, "permission denied");
    }
    (decision, effective)
}

/// Can `user` perform `permission`?
///
/// Absent users and blank permissions are always denied, even for a holder
/// of `"*"`.
pub fn can_user(user: Option<&UserContext>, permission: &str, registry: &RoleRegistry) -> bool {
    decide_logged(user, permission, registry).0.is_ok()
}

/// True only if every permission is granted. An empty list is denied.
pub fn can_user_all<S: AsRef<str>>(
    user: Option<&UserContext>,
    permissions: &[S],
    registry: &RoleRegistry,
) -> bool {
    !permissions.is_empty() && permissions.iter().all(|p| can_user(user, p.as_ref(), registry))
}

/// True if at least one permission is granted. An empty list is denied.
pub fn can_user_any<S: AsRef<str>>(
    user: Option<&UserContext>,
    permissions: &[S],
    registry: &RoleRegistry,
) -> bool {
    !permissions.is_empty() && permissions.iter().any(|p| can_user(user, p.as_ref(), registry))
}

/// Structured form of [`can_user`].
///
/// `reason` is advisory text for logs and debugging; never branch on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionCheckResult {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

pub fn check_permission(
    user: Option<&UserContext>,
    permission: &str,
    registry: &RoleRegistry,
) -> PermissionCheckResult {
    match decide_logged(user, permission, registry).0 {
        Ok(grant) => PermissionCheckResult {
            allowed: true,
            reason: Some(format!("granted by '{grant}'")),
        },
        Err(kind) => PermissionCheckResult {
            allowed: false,
            reason: Some(kind.reason(permission)),
        },
    }
}

/// Every permission string the user effectively holds, sorted.
pub fn effective_permissions(user: &UserContext, registry: &RoleRegistry) -> BTreeSet<String> {
    EffectivePermissions::collect(user, registry)
        .grants
        .into_iter()
        .map(str::to_string)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Authorization Explanation
// ─────────────────────────────────────────────────────────────────────────────

/// Detailed, debuggable account of a single decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    /// The permission that was being checked.
    pub permission: String,

    pub granted: bool,

    /// Human-readable reason for the decision.
    pub reason: String,

    /// The stored grant (`"x.y"`, `"*"`, or `"x.*"`) that satisfied the request.
    pub matched_grant: Option<String>,

    /// Everything the user holds, sorted. Empty when no set was computed.
    pub effective_permissions: Vec<String>,

    pub denial: Option<DenialKind>,
}

/// Explain why a decision was (or would be) made.
///
/// Allows and denies exactly what [`can_user`] does.
pub fn explain(user: Option<&UserContext>, permission: &str, registry: &RoleRegistry) -> Explanation {
    let (decision, effective) = decide(user, permission, registry);
    let effective_permissions = effective.as_ref().map(EffectivePermissions::sorted).unwrap_or_default();

    match decision {
        Ok(grant) => Explanation {
            permission: permission.to_string(),
            granted: true,
            reason: if grant == permission {
                format!("user holds '{permission}' explicitly")
            } else {
                format!("'{permission}' is covered by wildcard '{grant}'")
            },
            matched_grant: Some(grant.to_string()),
            effective_permissions,
            denial: None,
        },
        Err(kind) => Explanation {
            permission: permission.to_string(),
            granted: false,
            reason: kind.reason(permission),
            matched_grant: None,
            effective_permissions,
            denial: Some(kind),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RoleDefinitions, build_registry};

    fn registry() -> RoleRegistry {
        build_registry(
            &RoleDefinitions::new()
                .with_role("admin", ["*"])
                .with_role("manager", ["report.*", "user.read"])
                .with_role("auditor", ["report.admin.*"])
                .with_role("editor", ["post.create", "post.update"]),
        )
    }

    fn with_roles(roles: &[&'static str]) -> UserContext {
        UserContext::new().with_roles(roles.iter().copied())
    }

    #[test]
    fn absent_user_is_denied_everything() {
        let registry = registry();
        assert!(!can_user(None, "*", &registry));
        assert!(!can_user(None, "user.read", &registry));
        assert!(!can_user_all(None, &["user.read"], &registry));
        assert!(!can_user_any(None, &["user.read"], &registry));
    }

    #[test]
    fn blank_permission_is_denied_even_for_wildcard_holder() {
        let registry = registry();
        let admin = with_roles(&["admin"]);
        let direct = UserContext::new().with_permissions(["*"]);

        for user in [&admin, &direct] {
            assert!(!can_user(Some(user), "", &registry));
            assert!(!can_user(Some(user), "   ", &registry));
            assert!(!can_user(Some(user), "\t\n", &registry));
        }
    }

    #[test]
    fn global_wildcard_grants_anything() {
        let registry = registry();
        let admin = with_roles(&["admin"]);
        assert!(can_user(Some(&admin), "literally.anything", &registry));
        assert!(can_user(Some(&admin), "x", &registry));
    }

    #[test]
    fn namespace_wildcard_does_not_grant_bare_namespace() {
        let registry = registry();
        let manager = with_roles(&["manager"]);

        assert!(can_user(Some(&manager), "report.export", &registry));
        assert!(can_user(Some(&manager), "report.admin.export", &registry));
        assert!(!can_user(Some(&manager), "report", &registry));
        assert!(!can_user(Some(&manager), "reports.export", &registry));
    }

    #[test]
    fn nested_namespace_wildcard() {
        let registry = registry();
        let auditor = with_roles(&["auditor"]);

        assert!(can_user(Some(&auditor), "report.admin.export", &registry));
        assert!(!can_user(Some(&auditor), "report.export", &registry));
        assert!(!can_user(Some(&auditor), "report.admin", &registry));
    }

    #[test]
    fn direct_permissions_bypass_registry() {
        let empty = RoleRegistry::empty();
        let user = UserContext::new().with_permissions(["custom.feature"]);

        assert!(can_user(Some(&user), "custom.feature", &empty));
        assert!(!can_user(Some(&user), "custom.other", &empty));
    }

    #[test]
    fn unknown_roles_contribute_nothing() {
        let registry = registry();
        let user = with_roles(&["ghost", "editor"]);

        assert!(can_user(Some(&user), "post.create", &registry));
        assert!(!can_user(Some(&user), "post.delete", &registry));
    }

    #[test]
    fn matching_is_case_sensitive_and_literal() {
        let registry = registry();
        let editor = with_roles(&["editor"]);

        assert!(!can_user(Some(&editor), "Post.Create", &registry));
        assert!(!can_user(Some(&editor), " post.create", &registry));
        // `*` is only meaningful when granted, never when requested.
        assert!(!can_user(Some(&editor), "post.*", &registry));
    }

    #[test]
    fn roles_and_direct_permissions_union() {
        let registry = registry();
        let user = with_roles(&["editor"]).with_permissions(["billing.view"]);

        assert!(can_user_all(Some(&user), &["post.create", "billing.view"], &registry));
        assert!(!can_user_all(Some(&user), &["post.create", "billing.edit"], &registry));
        assert!(can_user_any(Some(&user), &["billing.edit", "billing.view"], &registry));
    }

    #[test]
    fn empty_lists_are_denied() {
        let registry = registry();
        let admin = with_roles(&["admin"]);
        let none: [&str; 0] = [];

        assert!(!can_user_all(Some(&admin), &none, &registry));
        assert!(!can_user_any(Some(&admin), &none, &registry));
    }

    #[test]
    fn check_permission_reports_cause() {
        let registry = registry();
        let manager = with_roles(&["manager"]);

        let granted = check_permission(Some(&manager), "report.export", &registry);
        assert!(granted.allowed);
        assert!(granted.reason.unwrap().contains("report.*"));

        let missing = check_permission(Some(&manager), "user.delete", &registry);
        assert!(!missing.allowed);
        assert!(missing.reason.unwrap().contains("user.delete"));

        let blank = check_permission(Some(&manager), " ", &registry);
        assert!(!blank.allowed);
        assert!(blank.reason.unwrap().contains("empty"));

        let nobody = check_permission(None, "user.read", &registry);
        assert!(!nobody.allowed);
        assert!(nobody.reason.unwrap().contains("no user"));
    }

    #[test]
    fn explain_names_the_matching_grant() {
        let registry = registry();
        let user = with_roles(&["manager"]).with_permissions(["billing.view"]);

        let exp = explain(Some(&user), "report.export", &registry);
        assert!(exp.granted);
        assert_eq!(exp.matched_grant.as_deref(), Some("report.*"));
        assert_eq!(exp.effective_permissions, vec!["billing.view", "report.*", "user.read"]);

        let exp = explain(Some(&user), "user.read", &registry);
        assert_eq!(exp.matched_grant.as_deref(), Some("user.read"));

        let exp = explain(Some(&user), "user.write", &registry);
        assert!(!exp.granted);
        assert_eq!(exp.denial, Some(DenialKind::MissingPermission));

        let exp = explain(None, "user.read", &registry);
        assert_eq!(exp.denial, Some(DenialKind::NoUser));
        assert!(exp.effective_permissions.is_empty());
    }

    #[test]
    fn effective_permissions_collapse_duplicates() {
        let registry = registry();
        let user = with_roles(&["manager", "manager", "ghost"]).with_permissions(["user.read"]);

        let effective = effective_permissions(&user, &registry);
        assert_eq!(
            effective.into_iter().collect::<Vec<_>>(),
            vec!["report.*".to_string(), "user.read".to_string()]
        );
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Property-based tests
    // ─────────────────────────────────────────────────────────────────────────

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        /// Independent matcher: walks grants instead of generating candidates.
        fn reference_allows(grants: &[String], requested: &str) -> bool {
            if requested.trim().is_empty() {
                return false;
            }
            grants.iter().any(|g| {
                g == requested
                    || g == "*"
                    || (g.ends_with(".*") && requested.starts_with(&g[..g.len() - 1]))
            })
        }

        fn requested() -> impl Strategy<Value = String> {
            prop_oneof![
                8 => "[abc](\\.[abc]){0,2}",
                1 => Just(String::new()),
                1 => Just("  ".to_string()),
            ]
        }

        fn grant() -> impl Strategy<Value = String> {
            prop_oneof![
                6 => "[abc](\\.[abc]){0,2}",
                3 => "[abc](\\.[abc]){0,1}\\.\\*",
                1 => Just("*".to_string()),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: single checks agree with the reference matcher.
            #[test]
            fn can_user_matches_reference(
                grants in prop::collection::vec(grant(), 0..6),
                request in requested(),
            ) {
                let user = UserContext::new().with_permissions(grants.clone());
                let registry = RoleRegistry::empty();

                prop_assert_eq!(
                    can_user(Some(&user), &request, &registry),
                    reference_allows(&grants, &request)
                );
            }

            /// Property: ALL/ANY are the per-element conjunction/disjunction, denied when empty.
            #[test]
            fn all_and_any_agree_with_reference(
                role_grants in prop::collection::vec(grant(), 0..4),
                direct in prop::collection::vec(grant(), 0..3),
                requests in prop::collection::vec(requested(), 0..5),
            ) {
                let registry = build_registry(
                    &RoleDefinitions::new().with_role("r", role_grants.clone()),
                );
                let user = UserContext::new()
                    .with_roles(["r"])
                    .with_permissions(direct.clone());

                let grants: Vec<String> = role_grants.into_iter().chain(direct).collect();
                let expected_all = !requests.is_empty()
                    && requests.iter().all(|p| reference_allows(&grants, p));
                let expected_any = requests.iter().any(|p| reference_allows(&grants, p));

                prop_assert_eq!(can_user_all(Some(&user), &requests, &registry), expected_all);
                prop_assert_eq!(can_user_any(Some(&user), &requests, &registry), expected_any);
            }

            /// Property: nobody is allowed anything.
            #[test]
            fn absent_user_always_denied(request in "\\PC{0,12}") {
                let registry = build_registry(&RoleDefinitions::new().with_role("admin", ["*"]));
                prop_assert!(!can_user(None, &request, &registry));
            }

            /// Property: explain and check_permission never disagree with can_user.
            #[test]
            fn diagnostics_agree_with_decision(
                grants in prop::collection::vec(grant(), 0..6),
                request in requested(),
            ) {
                let user = UserContext::new().with_permissions(grants);
                let registry = RoleRegistry::empty();

                let allowed = can_user(Some(&user), &request, &registry);
                prop_assert_eq!(check_permission(Some(&user), &request, &registry).allowed, allowed);
                prop_assert_eq!(explain(Some(&user), &request, &registry).granted, allowed);
            }
        }
    }
}
