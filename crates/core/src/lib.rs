//! `geoperm-core` — catalog domain building blocks.
//!
//! This crate contains **pure domain** primitives (no storage or CLI concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod resource;

pub use entity::Entity;
pub use error::DomainError;
pub use id::ResourceId;
pub use resource::{Resource, ResourceKind};
