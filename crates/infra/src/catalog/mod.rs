//! Catalog repository: where resources, principals and access-control
//! records live.

pub mod in_memory;
pub mod json_file;
pub mod snapshot;
pub mod r#trait;

pub use in_memory::InMemoryCatalog;
pub use json_file::JsonFileCatalog;
pub use r#trait::{Catalog, CatalogError, ResourceQuery};
pub use snapshot::{CatalogSnapshot, StoredResource};
