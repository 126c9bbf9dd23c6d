//! Supporter directory models.

mod model;

pub use model::{Profession, Supporter};
