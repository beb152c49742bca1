use std::fs;
use std::path::PathBuf;

use geoperm_auth::{Group, PermissionSpec, User};
use geoperm_core::{Resource, ResourceId};

use super::in_memory::InMemoryCatalog;
use super::r#trait::{Catalog, CatalogError, ResourceQuery};
use super::snapshot::CatalogSnapshot;

/// Catalog backed by a JSON document on disk.
///
/// The file is read once on open. Every `set_permissions` call rewrites the
/// whole document (temp file + rename), so each resource update is persisted
/// on its own.
#[derive(Debug)]
pub struct JsonFileCatalog {
    path: PathBuf,
    working: InMemoryCatalog,
}

impl JsonFileCatalog {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let raw = fs::read_to_string(&path).map_err(|source| CatalogError::Io {
            path: path.clone(),
            source,
        })?;
        let snapshot: CatalogSnapshot =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Json {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(
            path = %path.display(),
            resources = snapshot.resources.len(),
            users = snapshot.users.len(),
            groups = snapshot.groups.len(),
            "catalog loaded"
        );

        Ok(Self {
            path,
            working: InMemoryCatalog::from_snapshot(snapshot),
        })
    }

    /// Write `snapshot` to `path`, creating or replacing the file.
    pub fn create(path: impl Into<PathBuf>, snapshot: CatalogSnapshot) -> Result<Self, CatalogError> {
        let catalog = Self {
            path: path.into(),
            working: InMemoryCatalog::from_snapshot(snapshot),
        };
        catalog.flush()?;
        Ok(catalog)
    }

    fn flush(&self) -> Result<(), CatalogError> {
        let snapshot = self.working.snapshot()?;
        let json = serde_json::to_string_pretty(&snapshot).map_err(|source| CatalogError::Json {
            path: self.path.clone(),
            source,
        })?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let io_err = |source| CatalogError::Io {
            path: self.path.clone(),
            source,
        };
        fs::write(&tmp, json).map_err(io_err)?;
        fs::rename(&tmp, &self.path).map_err(io_err)?;

        tracing::debug!(path = %self.path.display(), "catalog written");
        Ok(())
    }
}

impl Catalog for JsonFileCatalog {
    fn find_resources(&self, query: &ResourceQuery) -> Result<Vec<Resource>, CatalogError> {
        self.working.find_resources(query)
    }

    fn find_user(&self, username: &str) -> Result<Option<User>, CatalogError> {
        self.working.find_user(username)
    }

    fn find_group(&self, name: &str) -> Result<Option<Group>, CatalogError> {
        self.working.find_group(name)
    }

    fn permissions(&self, resource: &ResourceId) -> Result<PermissionSpec, CatalogError> {
        self.working.permissions(resource)
    }

    fn set_permissions(
        &self,
        resource: &ResourceId,
        spec: &PermissionSpec,
    ) -> Result<(), CatalogError> {
        self.working.set_permissions(resource, spec)?;
        self.flush()
    }
}
