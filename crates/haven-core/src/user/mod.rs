//! User domain module.
//!
//! This module contains account and session models.
//!
//! # Module Structure
//!
//! - `model`: `Role`, `Account`, `SessionUser`, `RegistrationDetails`
//!
//! # Usage
//!
//! ```ignore
//! use haven_core::user::{Account, Role, SessionUser};
//! ```

mod model;

// Re-export public API
pub use model::{Account, RegistrationDetails, Role, SessionUser};
