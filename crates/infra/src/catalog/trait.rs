use std::path::PathBuf;

use thiserror::Error;

use geoperm_auth::{Group, PermissionSpec, User};
use geoperm_core::{Resource, ResourceId, ResourceKind};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog at {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown resource {0}")]
    UnknownResource(ResourceId),

    #[error("catalog lock poisoned")]
    Poisoned,
}

/// Which resources a command operates on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceQuery {
    /// Titles to match exactly; `None` selects every resource.
    pub titles: Option<Vec<String>>,
    /// Restrict to one kind; `None` selects every kind.
    pub kind: Option<ResourceKind>,
}

impl ResourceQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn titled(titles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            titles: Some(titles.into_iter().map(Into::into).collect()),
            kind: None,
        }
    }

    pub fn of_kind(mut self, kind: ResourceKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn matches(&self, resource: &Resource) -> bool {
        let kind_ok = self.kind.is_none_or(|k| k == resource.kind);
        let title_ok = self
            .titles
            .as_ref()
            .is_none_or(|titles| titles.iter().any(|t| *t == resource.title));
        kind_ok && title_ok
    }
}

/// Repository abstraction over the catalog's resources and principals.
///
/// Lookups return `Ok(None)` / empty vectors for absent entities; errors are
/// reserved for store failures.
pub trait Catalog {
    fn find_resources(&self, query: &ResourceQuery) -> Result<Vec<Resource>, CatalogError>;
    fn find_user(&self, username: &str) -> Result<Option<User>, CatalogError>;
    fn find_group(&self, name: &str) -> Result<Option<Group>, CatalogError>;

    /// Current access-control record of a resource.
    fn permissions(&self, resource: &ResourceId) -> Result<PermissionSpec, CatalogError>;

    /// Persist a resource's access-control record.
    ///
    /// Implementations keep the owner's entry at the full owner set.
    fn set_permissions(
        &self,
        resource: &ResourceId,
        spec: &PermissionSpec,
    ) -> Result<(), CatalogError>;
}
