//! Stateless JWT Authentication
//!
//! This module is the authentication core of Lyceum: token issuance and
//! verification, the per-request authentication middleware, and the
//! request-scoped security context that downstream authorization reads.
//!
//! # Module Structure
//!
//! - [`auth::token`](crate::auth::token) - HS256 token issuance, verification and claims parsing
//! - [`auth::middleware`](crate::auth::middleware) - Axum middleware and the `CurrentUser` extractor
//! - [`auth::context`](crate::auth::context) - Request-scoped principal and authority set
//! - [`auth::access`](crate::auth::access) - Read helpers for authorization decisions
//! - [`auth::password`](crate::auth::password) - Argon2id password hashing
//!
//! # Security Model
//!
//! - **Stateless**: tokens are self-contained; nothing is stored server-side
//!   and a token stays valid until its embedded expiry passes
//! - **HS256 only**: a single symmetric key signs every token, and tokens
//!   presenting any other algorithm are rejected
//! - **Never rejects at the filter**: a missing or invalid token produces an
//!   anonymous context, and route guards decide what that means per route
//!
//! # Usage
//!
//! ## Issuing Tokens
//!
//! ```ignore
//! use lyceum::auth::token::TokenService;
//! use lyceum::types::Role;
//!
//! let tokens = TokenService::new(secret, 900_000, 604_800_000)?;
//! let access = tokens.issue_access_token(42, "a@b.com", Role::Learner)?;
//! ```
//!
//! ## Wiring the Middleware
//!
//! ```ignore
//! use axum::{middleware, Router};
//! use lyceum::auth::middleware::authenticate;
//!
//! let app = Router::new()
//!     .route("/users/me", get(handler))
//!     .layer(middleware::from_fn_with_state(tokens.clone(), authenticate));
//! ```
//!
//! ## Reading the Context in Guards
//!
//! ```ignore
//! use lyceum::auth::{access, context::SecurityContext};
//!
//! let ctx = req.extensions().get::<SecurityContext>();
//! if ctx.map(access::is_authenticated).unwrap_or(false) {
//!     // caller presented a valid access token
//! }
//! ```

/// Read helpers over the request security context.
pub mod access;
/// Request-scoped principal and authority set.
pub mod context;
/// Authentication middleware and extractors for protected routes.
pub mod middleware;
/// Argon2id password hashing helpers.
pub mod password;
/// JWT token issuance, verification and claims parsing.
pub mod token;
