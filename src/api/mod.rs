//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for Lyceum, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//! - [`api::guard`](crate::api::guard) - Authentication and role guards for route subtrees
//! - [`api::openapi`](crate::api::openapi) - OpenAPI specification assembly
//!
//! # API Endpoints
//!
//! ## Authentication (`/api/auth`)
//! - `POST /api/auth/register` - Register new account, receive a token pair
//! - `POST /api/auth/login` - Login and receive a token pair
//! - `POST /api/auth/refresh` - Exchange a refresh token for a new pair
//!
//! ## Users (`/api/users`)
//! - `GET /api/users/me` - Profile of the authenticated user
//! - `GET /api/users` - List all accounts (admin only)
//!
//! ## Health (`/api/health`)
//! - `GET /api/health` - Health check endpoint
//!
//! # Authentication
//!
//! Protected endpoints require a valid JWT token in the `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! Requests without one still reach the public endpoints; the guards on the
//! protected subtrees answer 401 (no valid token) or 403 (missing role).
//!
//! # OpenAPI Documentation
//!
//! The generated OpenAPI specification is served at `/api/docs/openapi.json`.

/// Authentication and role guards for protected route subtrees.
pub mod guard;
/// Request and response handlers for all API endpoints.
pub mod handlers;
/// OpenAPI specification assembly.
pub mod openapi;
/// Router configuration and route definitions.
pub mod routes;
