//! Dossier application services.

mod assembler;

pub use assembler::DossierAssembler;
