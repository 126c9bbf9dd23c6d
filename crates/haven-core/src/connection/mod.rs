//! Connection and messaging domain module.
//!
//! # Module Structure
//!
//! - `model`: `Connection`, `ConnectionStatus`, `Message`

mod model;

pub use model::{Connection, ConnectionStatus, Message};
