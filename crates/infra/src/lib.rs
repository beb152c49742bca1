//! Infrastructure layer: catalog stores and configuration.

pub mod catalog;
pub mod config;

pub use catalog::{
    Catalog, CatalogError, CatalogSnapshot, InMemoryCatalog, JsonFileCatalog, ResourceQuery,
    StoredResource,
};
pub use config::{Config, ConfigError};
