//! Application layer for Haven.
//!
//! Stateful stores and the AI-backed services that enrich them. Everything
//! is constructed explicitly through [`AppContext`]; there are no globals.

pub mod classification_service;
pub mod connection;
pub mod context;
pub mod dossier;
pub mod evidence;
pub mod identity;
mod prompts;
pub mod scripted_capability;
pub mod seed;
pub mod summarization_service;

pub use classification_service::ClassificationService;
pub use connection::ConnectionStore;
pub use context::AppContext;
pub use dossier::DossierAssembler;
pub use evidence::EvidenceStore;
pub use identity::{IdentityStore, generate_alias};
pub use scripted_capability::ScriptedCapability;
pub use summarization_service::SummarizationService;
