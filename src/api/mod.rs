//! API clients for external services
//!
//! - Catalog: podcast shows, seasons and episodes

pub mod catalog;

pub use catalog::{CatalogClient, CatalogError};
