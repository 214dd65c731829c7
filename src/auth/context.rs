use crate::types::Role;
use std::collections::HashSet;

/// The identity resolved from a verified access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Positive numeric user id from the token subject.
    pub user_id: i64,
    /// Account email from the token claims.
    pub email: String,
    /// Platform role from the token claims.
    pub role: Role,
}

/// Per-request authentication state.
///
/// Built once by the authentication middleware and carried in the request
/// extensions, so it is dropped with the request and never shared between
/// concurrent requests. There is no mutation API: a context is either
/// anonymous or authenticated from construction.
#[derive(Debug, Clone, Default)]
pub struct SecurityContext {
    principal: Option<Principal>,
    authorities: HashSet<String>,
}

impl SecurityContext {
    /// A context with no principal, used when no valid token was presented.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A context holding a verified principal and its derived authority.
    pub fn authenticated(principal: Principal) -> Self {
        let mut authorities = HashSet::new();
        authorities.insert(principal.role.authority());

        Self {
            principal: Some(principal),
            authorities,
        }
    }

    /// The authenticated principal, if any.
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// The granted authorities (`ROLE_*` strings) of the principal.
    pub fn authorities(&self) -> &HashSet<String> {
        &self.authorities
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creator_principal() -> Principal {
        Principal {
            user_id: 42,
            email: "a@b.com".to_string(),
            role: Role::Creator,
        }
    }

    #[test]
    fn test_anonymous_context_is_empty() {
        let ctx = SecurityContext::anonymous();

        assert!(ctx.principal().is_none());
        assert!(ctx.authorities().is_empty());
    }

    #[test]
    fn test_authenticated_context_derives_authority() {
        let ctx = SecurityContext::authenticated(creator_principal());

        assert_eq!(ctx.principal().map(|p| p.user_id), Some(42));
        assert!(
            ctx.authorities().contains("ROLE_CREATOR"),
            "authority should be ROLE_ prefixed"
        );
        assert_eq!(
            ctx.authorities().len(),
            1,
            "exactly one authority per principal"
        );
    }

    #[test]
    fn test_contexts_are_independent() {
        let first = SecurityContext::authenticated(creator_principal());
        let second = SecurityContext::authenticated(Principal {
            user_id: 7,
            email: "other@b.com".to_string(),
            role: Role::Admin,
        });

        assert_eq!(first.principal().map(|p| p.user_id), Some(42));
        assert_eq!(second.principal().map(|p| p.user_id), Some(7));
        assert!(!first.authorities().contains("ROLE_ADMIN"));
    }
}
