//! Dossier domain module.

mod model;

pub use model::{
    Dossier, DossierMetadata, PLACEHOLDER_DESCRIPTION, PLACEHOLDER_TITLE, aggregate_severity,
};
