//! Route guards enforcing authentication and role requirements.
//!
//! The authentication middleware never rejects a request; these guards do.
//! Layer them on the route subtrees that need protection, inside the
//! authentication layer so the [`SecurityContext`] is already attached.

use crate::auth::access;
use crate::auth::context::SecurityContext;
use crate::types::AppError;
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

/// Rejects anonymous requests with 401.
pub async fn require_auth(req: Request, next: Next) -> Response {
    if !context_of(&req).map(access::is_authenticated).unwrap_or(false) {
        return AppError::Auth("Authentication required".to_string()).into_response();
    }

    next.run(req).await
}

/// Rejects requests whose principal lacks the given role.
///
/// Anonymous requests get 401; authenticated ones without the `ROLE_`
/// authority get 403.
pub async fn require_role(role: &'static str, req: Request, next: Next) -> Response {
    let Some(ctx) = context_of(&req) else {
        return AppError::Auth("Authentication required".to_string()).into_response();
    };

    if !access::is_authenticated(ctx) {
        return AppError::Auth("Authentication required".to_string()).into_response();
    }

    if !access::has_role(ctx, role) {
        warn!(
            "User {:?} denied access to a {} route",
            access::current_user_id(ctx),
            role
        );
        return AppError::Forbidden(format!("Requires {} role", role)).into_response();
    }

    next.run(req).await
}

fn context_of(req: &Request) -> Option<&SecurityContext> {
    req.extensions().get::<SecurityContext>()
}
