//! User account storage.
//!
//! The [`users::UserStore`] trait is the boundary between the account
//! handlers and whatever holds the accounts. The bundled implementation is
//! an in-memory map; a persistent backend plugs in behind the same trait.

#![allow(missing_docs)]

pub mod users;

// Re-exports
pub use users::{InMemoryUserStore, NewUser, UserRecord, UserStore};
