//! Access-control record of a single resource.
//!
//! A `PermissionSpec` is fetched fresh from the store for each resource,
//! mutated in place by the assignment procedures, then written back once.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::permissions::{Permission, PermissionLevel};
use crate::principal::PrincipalKind;

/// Per-principal permission lists for one resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionSpec {
    #[serde(default)]
    pub users: BTreeMap<String, Vec<Permission>>,
    #[serde(default)]
    pub groups: BTreeMap<String, Vec<Permission>>,
}

/// Result of removing permissions from one principal's list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Removal {
    pub removed: Vec<Permission>,
    pub missing: Vec<Permission>,
}

impl PermissionSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self, kind: PrincipalKind) -> &BTreeMap<String, Vec<Permission>> {
        match kind {
            PrincipalKind::User => &self.users,
            PrincipalKind::Group => &self.groups,
        }
    }

    fn entries_mut(&mut self, kind: PrincipalKind) -> &mut BTreeMap<String, Vec<Permission>> {
        match kind {
            PrincipalKind::User => &mut self.users,
            PrincipalKind::Group => &mut self.groups,
        }
    }

    pub fn get(&self, kind: PrincipalKind, name: &str) -> Option<&[Permission]> {
        self.entries(kind).get(name).map(Vec::as_slice)
    }

    pub fn user(&self, username: &str) -> Option<&[Permission]> {
        self.get(PrincipalKind::User, username)
    }

    pub fn group(&self, name: &str) -> Option<&[Permission]> {
        self.get(PrincipalKind::Group, name)
    }

    /// Replace a principal's list with `permissions`.
    pub fn set(&mut self, kind: PrincipalKind, name: &str, permissions: &[Permission]) {
        self.entries_mut(kind)
            .insert(name.to_string(), permissions.to_vec());
    }

    /// Remove each requested permission from a principal's list.
    ///
    /// Returns `None` when the principal has no entry at all; the spec is
    /// left untouched in that case.
    pub fn remove(
        &mut self,
        kind: PrincipalKind,
        name: &str,
        permissions: &[Permission],
    ) -> Option<Removal> {
        let existing = self.entries_mut(kind).get_mut(name)?;
        let mut removal = Removal::default();
        for p in permissions {
            if existing.contains(p) {
                existing.retain(|e| e != p);
                removal.removed.push(p.clone());
            } else {
                removal.missing.push(p.clone());
            }
        }
        Some(removal)
    }

    /// Additively merge `permissions` into a principal's list.
    ///
    /// Existing entries keep their order; permissions not yet present are
    /// appended in the order requested. Returns the appended permissions.
    pub fn merge(
        &mut self,
        kind: PrincipalKind,
        name: &str,
        permissions: &[Permission],
    ) -> Vec<Permission> {
        let existing = self.entries_mut(kind).entry(name.to_string()).or_default();
        let mut added = Vec::new();
        for p in permissions {
            if !existing.contains(p) {
                existing.push(p.clone());
                added.push(p.clone());
            }
        }
        added
    }

    /// Pin the owner's user entry to the full owner permission set.
    pub fn ensure_owner(&mut self, owner: &str) {
        self.set(PrincipalKind::User, owner, PermissionLevel::Owner.permissions());
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.groups.is_empty()
    }
}

impl core::fmt::Display for PermissionSpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| core::fmt::Error)?;
        f.write_str(&json)
    }
}
