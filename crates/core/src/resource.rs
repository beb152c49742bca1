//! Catalog resources (layers, maps, documents).

use serde::{Deserialize, Serialize};

use crate::{Entity, ResourceId};

/// Kind of catalog resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    #[default]
    Layer,
    Map,
    Document,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Layer => "layer",
            ResourceKind::Map => "map",
            ResourceKind::Document => "document",
        }
    }

    pub fn is_layer(&self) -> bool {
        matches!(self, ResourceKind::Layer)
    }
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog resource as seen by the permission tooling.
///
/// The access-control record itself is owned by the store and fetched
/// separately, once per update cycle.
///
/// # Invariants
/// - `title` is not unique; lookups by title may return several resources.
/// - `owner` names the user whose permissions are never changed by this tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    #[serde(default)]
    pub kind: ResourceKind,
    pub owner: String,
}

impl Resource {
    pub fn new(
        id: ResourceId,
        title: impl Into<String>,
        kind: ResourceKind,
        owner: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            kind,
            owner: owner.into(),
        }
    }

    pub fn layer(title: impl Into<String>, owner: impl Into<String>) -> Self {
        Self::new(ResourceId::new(), title, ResourceKind::Layer, owner)
    }

    /// Whether `username` owns this resource.
    pub fn is_owned_by(&self, username: &str) -> bool {
        self.owner == username
    }
}

impl Entity for Resource {
    type Id = ResourceId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
