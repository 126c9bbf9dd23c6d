//! Identity application services.
//!
//! This module contains the account registry, the current session slot and
//! the survivor alias generator.

mod alias;
mod store;

pub use alias::generate_alias;
pub use store::IdentityStore;
