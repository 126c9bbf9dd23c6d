//! Connection and messaging application services.

mod store;

pub use store::ConnectionStore;
