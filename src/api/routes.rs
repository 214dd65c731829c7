use crate::auth::token::TokenService;
use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Builds the `/api` router.
///
/// The authentication middleware is layered outermost so every route,
/// public ones included, gets a [`SecurityContext`] attached. Guards on
/// the protected subtrees turn a missing or under-privileged context into
/// 401/403; the public subtree ignores it.
///
/// [`SecurityContext`]: crate::auth::context::SecurityContext
pub fn create_router(tokens: Arc<TokenService>) -> Router<AppState> {
    let public_routes = Router::new()
        // Public routes (no auth required)
        .route("/health", get(crate::api::handlers::health::health))
        .route("/auth/register", post(crate::api::handlers::auth::register))
        .route("/auth/login", post(crate::api::handlers::auth::login))
        .route("/auth/refresh", post(crate::api::handlers::auth::refresh))
        .merge(crate::api::openapi::router());

    let protected_routes = Router::new()
        // Routes requiring an authenticated caller
        .route("/users/me", get(crate::api::handlers::users::me))
        .layer(middleware::from_fn(crate::api::guard::require_auth));

    let admin_routes = Router::new()
        // Routes requiring the ADMIN role
        .route("/users", get(crate::api::handlers::users::list_users))
        .layer(middleware::from_fn(|req, next| {
            crate::api::guard::require_role("ADMIN", req, next)
        }));

    public_routes
        .merge(protected_routes)
        .merge(admin_routes)
        .layer(middleware::from_fn_with_state(
            tokens,
            crate::auth::middleware::authenticate,
        ))
}
