use std::sync::Arc;

use axum::{extract::Request, http::HeaderMap};

use rolegate_auth::UserContext;

/// Pulls the acting user out of a request, or `None` when there is none.
///
/// The default reads the `UserContext` request extension, which the caller's
/// authentication layer is expected to insert.
pub type UserExtractor = Arc<dyn Fn(&Request) -> Option<UserContext> + Send + Sync>;

pub fn extension_extractor() -> UserExtractor {
    Arc::new(|req: &Request| req.extensions().get::<UserContext>().cloned())
}

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_ROLES_HEADER: &str = "x-user-roles";
pub const USER_PERMISSIONS_HEADER: &str = "x-user-permissions";

/// Build a user from plain identity headers.
///
/// Values are trusted verbatim: this is only for local development and tests
/// where no real authentication layer sits in front. Lists are
/// comma-separated; blank items are dropped. Returns `None` when none of the
/// identity headers is present.
pub fn user_from_headers(headers: &HeaderMap) -> Option<UserContext> {
    let header = |name: &str| headers.get(name).and_then(|v| v.to_str().ok());

    let id = header(USER_ID_HEADER);
    let roles = header(USER_ROLES_HEADER);
    let permissions = header(USER_PERMISSIONS_HEADER);

    if id.is_none() && roles.is_none() && permissions.is_none() {
        return None;
    }

    let mut user = UserContext::new()
        .with_roles(split_list(roles))
        .with_permissions(split_list(permissions));
    if let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) {
        user = user.with_id(id);
    }
    Some(user)
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use rolegate_auth::{Permission, Role};

    use super::*;

    #[test]
    fn no_identity_headers_means_no_user() {
        assert!(user_from_headers(&HeaderMap::new()).is_none());
    }

    #[test]
    fn parses_comma_separated_lists() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("u-42"));
        headers.insert(USER_ROLES_HEADER, HeaderValue::from_static(" editor, ,viewer "));
        headers.insert(USER_PERMISSIONS_HEADER, HeaderValue::from_static("custom.feature"));

        let user = user_from_headers(&headers).unwrap();
        assert_eq!(user.id.as_deref(), Some("u-42"));
        assert_eq!(user.roles, vec![Role::new("editor"), Role::new("viewer")]);
        assert_eq!(user.permissions, vec![Permission::new("custom.feature")]);
    }

    #[test]
    fn roles_alone_identify_a_user() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_ROLES_HEADER, HeaderValue::from_static("admin"));

        let user = user_from_headers(&headers).unwrap();
        assert!(user.id.is_none());
        assert_eq!(user.roles, vec![Role::new("admin")]);
    }
}
