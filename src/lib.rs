//! # Lyceum - Stateless JWT Authentication
//!
//! The authentication service behind a social learning platform: bearer-token
//! issuance and verification, per-request authentication middleware, and the
//! accessors that route-level authorization is built on.
//!
//! ## Overview
//!
//! Lyceum can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `lyceum-server` binary
//! 2. **As a library** - Wire the token service and middleware into your own Axum app
//!
//! Authentication is fully stateless: a token is a signed HS256 JWT whose
//! validity is decided by its signature and embedded expiry alone. Nothing is
//! stored per session, there is no revocation list, and any number of server
//! instances sharing the signing key verify the same tokens.
//!
//! ## Quick Start (Library Usage)
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! lyceum-server = "0.3"
//! ```
//!
//! ### Basic Example
//!
//! ```rust,ignore
//! use axum::{middleware, routing::get, Router};
//! use lyceum::auth::middleware::{authenticate, CurrentUser};
//! use lyceum::auth::token::TokenService;
//! use lyceum::types::Role;
//! use std::sync::Arc;
//!
//! let tokens = Arc::new(TokenService::new(secret, 900_000, 604_800_000)?);
//!
//! // Issue a token pair for a user
//! let pair = tokens.issue_token_pair(42, "a@b.com", Role::Learner)?;
//!
//! // Authenticate every request; handlers opt in to requiring identity
//! let app = Router::new()
//!     .route("/whoami", get(|CurrentUser(user): CurrentUser| async move {
//!         user.email
//!     }))
//!     .layer(middleware::from_fn_with_state(tokens.clone(), authenticate));
//! ```
//!
//! ### Checking Roles
//!
//! ```rust,ignore
//! use lyceum::auth::{access, context::SecurityContext};
//!
//! fn can_publish(ctx: &SecurityContext) -> bool {
//!     access::has_role(ctx, "CREATOR") || access::has_role(ctx, "ADMIN")
//! }
//! ```
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers, routes and guards
//! - [`auth`] - Token service, middleware, security context and accessors
//! - [`db`] - User account storage behind the `UserStore` trait
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration
//!
//! ## Architecture
//!
//! Requests flow through one authentication middleware that attaches a
//! request-scoped `SecurityContext` (anonymous or authenticated) and always
//! lets the request continue. Route guards and extractors downstream decide
//! whether an anonymous context means 401, 403, or nothing at all. The
//! context is dropped with the request, so no authentication state outlives
//! it or leaks between concurrent requests.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers, routes and guards.
pub mod api;
/// JWT authentication core: tokens, middleware, context, accessors.
pub mod auth;
/// User account storage.
pub mod db;
/// Core types (requests, responses, errors).
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use auth::context::{Principal, SecurityContext};
pub use auth::token::{TokenError, TokenService};
pub use db::{InMemoryUserStore, UserStore};
pub use types::{AppError, Result, Role};
pub use utils::config::Config;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Runtime configuration, loaded once at startup
    pub config: Arc<Config>,
    /// Token issuance and verification service
    pub tokens: Arc<TokenService>,
    /// User account storage
    pub users: Arc<dyn UserStore>,
}
