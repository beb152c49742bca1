use std::sync::{PoisonError, RwLock};

use geoperm_auth::{Group, PermissionSpec, User};
use geoperm_core::{Entity, Resource, ResourceId};

use super::r#trait::{Catalog, CatalogError, ResourceQuery};
use super::snapshot::{CatalogSnapshot, StoredResource};

/// In-memory catalog.
///
/// Used directly by tests and as the working copy behind
/// [`JsonFileCatalog`](super::JsonFileCatalog).
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inner: RwLock<CatalogSnapshot>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self {
            inner: RwLock::new(snapshot),
        }
    }

    fn state_mut(&mut self) -> &mut CatalogSnapshot {
        self.inner.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn with_user(mut self, username: &str) -> Self {
        self.state_mut().users.push(User::new(username));
        self
    }

    pub fn with_group(mut self, name: &str) -> Self {
        self.state_mut().groups.push(Group::new(name));
        self
    }

    /// Add a resource; the owner's entry is pinned to the full owner set.
    pub fn with_resource(mut self, resource: Resource, mut permissions: PermissionSpec) -> Self {
        permissions.ensure_owner(&resource.owner);
        self.state_mut().resources.push(StoredResource {
            resource,
            permissions,
        });
        self
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> Result<CatalogSnapshot, CatalogError> {
        let state = self.inner.read().map_err(|_| CatalogError::Poisoned)?;
        Ok(state.clone())
    }
}

impl Catalog for InMemoryCatalog {
    fn find_resources(&self, query: &ResourceQuery) -> Result<Vec<Resource>, CatalogError> {
        let state = self.inner.read().map_err(|_| CatalogError::Poisoned)?;
        Ok(state
            .resources
            .iter()
            .filter(|stored| query.matches(&stored.resource))
            .map(|stored| stored.resource.clone())
            .collect())
    }

    fn find_user(&self, username: &str) -> Result<Option<User>, CatalogError> {
        let state = self.inner.read().map_err(|_| CatalogError::Poisoned)?;
        Ok(state.users.iter().find(|u| u.username == username).cloned())
    }

    fn find_group(&self, name: &str) -> Result<Option<Group>, CatalogError> {
        let state = self.inner.read().map_err(|_| CatalogError::Poisoned)?;
        Ok(state.groups.iter().find(|g| g.name == name).cloned())
    }

    fn permissions(&self, resource: &ResourceId) -> Result<PermissionSpec, CatalogError> {
        let state = self.inner.read().map_err(|_| CatalogError::Poisoned)?;
        state
            .resources
            .iter()
            .find(|stored| stored.resource.id() == resource)
            .map(|stored| stored.permissions.clone())
            .ok_or(CatalogError::UnknownResource(*resource))
    }

    fn set_permissions(
        &self,
        resource: &ResourceId,
        spec: &PermissionSpec,
    ) -> Result<(), CatalogError> {
        let mut state = self.inner.write().map_err(|_| CatalogError::Poisoned)?;
        let stored = state
            .resources
            .iter_mut()
            .find(|stored| stored.resource.id() == resource)
            .ok_or(CatalogError::UnknownResource(*resource))?;

        let mut spec = spec.clone();
        spec.ensure_owner(&stored.resource.owner);
        stored.permissions = spec;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoperm_auth::{resolve, PrincipalKind};
    use geoperm_core::ResourceKind;

    fn catalog() -> (InMemoryCatalog, Resource, Resource) {
        let roads = Resource::layer("roads", "admin");
        let map = Resource::new(ResourceId::new(), "roads", ResourceKind::Map, "admin");
        let catalog = InMemoryCatalog::new()
            .with_user("admin")
            .with_user("alice")
            .with_group("editors")
            .with_resource(roads.clone(), PermissionSpec::new())
            .with_resource(map.clone(), PermissionSpec::new());
        (catalog, roads, map)
    }

    #[test]
    fn finds_principals_by_exact_name() {
        let (catalog, _, _) = catalog();
        assert_eq!(catalog.find_user("alice").unwrap(), Some(User::new("alice")));
        assert_eq!(catalog.find_user("Alice").unwrap(), None);
        assert_eq!(catalog.find_group("editors").unwrap(), Some(Group::new("editors")));
        assert_eq!(catalog.find_group("viewers").unwrap(), None);
    }

    #[test]
    fn duplicate_titles_all_match() {
        let (catalog, roads, _) = catalog();
        assert_eq!(catalog.find_resources(&ResourceQuery::titled(["roads"])).unwrap().len(), 2);

        let layers = catalog
            .find_resources(&ResourceQuery::all().of_kind(ResourceKind::Layer))
            .unwrap();
        assert_eq!(layers, vec![roads]);
    }

    #[test]
    fn new_resources_start_with_owner_entry() {
        let (catalog, roads, _) = catalog();
        let spec = catalog.permissions(&roads.id).unwrap();
        assert_eq!(spec.user("admin").unwrap(), resolve("owner"));
    }

    #[test]
    fn set_permissions_persists_and_keeps_owner() {
        let (catalog, roads, _) = catalog();
        let mut spec = PermissionSpec::new();
        spec.set(PrincipalKind::User, "alice", resolve("read"));

        catalog.set_permissions(&roads.id, &spec).unwrap();

        let stored = catalog.permissions(&roads.id).unwrap();
        assert_eq!(stored.user("alice").unwrap(), resolve("read"));
        assert_eq!(stored.user("admin").unwrap(), resolve("owner"));
    }

    #[test]
    fn builders_survive_a_poisoned_lock() {
        let catalog = InMemoryCatalog::new().with_user("admin");
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = catalog.inner.write().unwrap();
            panic!("poison the catalog lock");
        }));
        assert!(catalog.inner.is_poisoned());

        let catalog = catalog.with_user("alice").with_group("editors");

        let state = catalog.inner.into_inner().unwrap_or_else(PoisonError::into_inner);
        assert_eq!(state.users, vec![User::new("admin"), User::new("alice")]);
        assert_eq!(state.groups, vec![Group::new("editors")]);
    }

    #[test]
    fn unknown_resource_is_an_error() {
        let (catalog, _, _) = catalog();
        let missing = ResourceId::new();
        assert!(matches!(
            catalog.permissions(&missing),
            Err(CatalogError::UnknownResource(id)) if id == missing
        ));
        assert!(catalog.set_permissions(&missing, &PermissionSpec::new()).is_err());
    }
}
