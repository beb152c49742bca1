//! `geoperm-auth` — permission levels, principals and access-control records.
//!
//! This crate is intentionally decoupled from storage and the command line:
//! everything here operates on in-memory values.

pub mod assign;
pub mod perm_spec;
pub mod permissions;
pub mod principal;

pub use assign::{apply_layer_update, apply_resource_update, Assignment, Notice, ResourceReport};
pub use perm_spec::{PermissionSpec, Removal};
pub use permissions::{resolve, Permission, PermissionLevel};
pub use principal::{Group, PrincipalKind, User};
