//! Evidence domain module.
//!
//! # Module Structure
//!
//! - `model`: `EvidenceItem`, `Platform`
//! - `classification`: `Classification`, `Category`, `Severity`
//! - `fingerprint`: content digest used as the tamper-evidence signature

mod classification;
mod fingerprint;
mod model;

pub use classification::{Category, Classification, Severity};
pub use fingerprint::fingerprint;
pub use model::{EvidenceItem, Platform};
