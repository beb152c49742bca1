use serde::{Deserialize, Serialize};

use geoperm_auth::{Group, PermissionSpec, User};
use geoperm_core::Resource;

/// A resource together with its stored access-control record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredResource {
    #[serde(flatten)]
    pub resource: Resource,
    #[serde(default)]
    pub permissions: PermissionSpec,
}

/// Whole-catalog state, as held in memory and as written to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub resources: Vec<StoredResource>,
}
