//! API request handlers.
//!
//! This module contains all HTTP request handlers organized by functionality.

/// Authentication handlers (register, login, refresh).
pub mod auth;
/// Health check handler.
pub mod health;
/// User profile and account listing handlers.
pub mod users;
