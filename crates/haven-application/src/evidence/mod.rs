//! Evidence application services.

mod store;

pub use store::EvidenceStore;
