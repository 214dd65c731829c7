use crate::auth::access;
use crate::auth::context::{Principal, SecurityContext};
use crate::auth::token::TokenService;
use crate::types::{AppError, Claims};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{debug, error};

/// Authenticates a request from its `Authorization` header.
///
/// Runs once per request, before any route guard. A verified bearer token
/// yields an authenticated [`SecurityContext`]; anything else (no header,
/// wrong scheme, invalid or expired token, refresh token, bad claims)
/// yields an anonymous one. The middleware itself never rejects: it always
/// attaches a context to the request extensions and lets the request
/// proceed, leaving enforcement to the routing layer.
pub async fn authenticate(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Response {
    let context = match bearer_token(&req) {
        Some(token) if tokens.verify(token) => match tokens.parse_claims(token) {
            Ok(claims) => match principal_from_claims(claims) {
                Ok(principal) => {
                    debug!(
                        "Authenticated user {} with role {}",
                        principal.email, principal.role
                    );
                    SecurityContext::authenticated(principal)
                }
                Err(reason) => {
                    error!("Could not establish authentication: {}", reason);
                    SecurityContext::anonymous()
                }
            },
            // verify() already logged the cause.
            Err(_) => SecurityContext::anonymous(),
        },
        _ => SecurityContext::anonymous(),
    };

    req.extensions_mut().insert(context);
    next.run(req).await
}

/// The token portion of a `Bearer` authorization header, if present.
fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Builds a [`Principal`] from verified access-token claims.
///
/// Refresh tokens (no email/role) and tokens with a non-numeric or
/// non-positive subject do not authenticate a request.
fn principal_from_claims(claims: Claims) -> std::result::Result<Principal, String> {
    let user_id: i64 = claims
        .sub
        .trim()
        .parse()
        .map_err(|_| format!("subject is not a numeric user id: {:?}", claims.sub))?;
    if user_id <= 0 {
        return Err(format!("subject is not a positive user id: {}", user_id));
    }

    let email = claims.email.ok_or("email claim is missing")?;
    let role = claims.role.ok_or("role claim is missing")?;

    Ok(Principal {
        user_id,
        email,
        role,
    })
}

/// Extractor for handlers that require an authenticated caller.
///
/// Pulls the [`Principal`] out of the request's [`SecurityContext`] and
/// rejects with 401 when the request is anonymous.
pub struct CurrentUser(pub Principal);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SecurityContext>()
            .and_then(|ctx| access::current_principal(ctx).cloned())
            .map(CurrentUser)
            .ok_or_else(|| AppError::Auth("Authentication required".to_string()))
    }
}
