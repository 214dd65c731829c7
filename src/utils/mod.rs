//! Shared utilities.

#![allow(missing_docs)]

/// Environment-backed runtime configuration.
pub mod config;
