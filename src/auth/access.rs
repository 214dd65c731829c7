//! Read helpers over a request's [`SecurityContext`].
//!
//! Authorization decisions downstream of the authentication middleware go
//! through these functions rather than poking at the context directly. All
//! of them are pure reads; an anonymous context yields `None`/`false`.

use crate::auth::context::{Principal, SecurityContext};

/// The id of the authenticated user, if any.
pub fn current_user_id(ctx: &SecurityContext) -> Option<i64> {
    ctx.principal().map(|p| p.user_id)
}

/// Whether the request carries an authenticated principal.
pub fn is_authenticated(ctx: &SecurityContext) -> bool {
    ctx.principal().is_some()
}

/// Whether the authenticated principal holds the `ROLE_`-prefixed
/// authority for `role` (e.g. `has_role(ctx, "ADMIN")`).
pub fn has_role(ctx: &SecurityContext, role: &str) -> bool {
    ctx.authorities().contains(&format!("ROLE_{}", role))
}

/// The full authenticated principal, if any.
pub fn current_principal(ctx: &SecurityContext) -> Option<&Principal> {
    ctx.principal()
}
