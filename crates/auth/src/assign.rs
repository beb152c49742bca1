//! Per-resource permission assignment procedures.
//!
//! Two flavours exist, one per command:
//! - [`apply_layer_update`]: overwrite (or, with `delete`, remove) each
//!   principal's list with the requested permissions.
//! - [`apply_resource_update`]: additive merge, never removing anything.
//!
//! In both, the resource owner's entry is never touched.

use geoperm_core::{Resource, ResourceKind};

use crate::perm_spec::PermissionSpec;
use crate::permissions::Permission;
use crate::principal::{Group, PrincipalKind, User};

/// What to apply: one permission list, to a set of found principals.
#[derive(Debug, Clone, Copy)]
pub struct Assignment<'a> {
    pub permissions: &'a [Permission],
    pub users: &'a [User],
    pub groups: &'a [Group],
}

/// A non-fatal condition encountered while updating one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The resource owner was requested; its permissions are left alone.
    OwnerSkipped {
        user: String,
        kind: ResourceKind,
        title: String,
    },
    /// A permission slated for removal was not held by the principal.
    PermissionMissing {
        principal: PrincipalKind,
        name: String,
        permission: Permission,
        kind: ResourceKind,
        title: String,
    },
}

impl core::fmt::Display for Notice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Notice::OwnerSkipped { user, kind, title } => write!(
                f,
                "Warning! - The user {user} is the owner of the {kind} {title}. \
                 Owner permissions can't be changed."
            ),
            Notice::PermissionMissing {
                principal,
                name,
                permission,
                kind,
                title,
            } => write!(
                f,
                "Warning! - Permission {permission} does not exist for {} {name} on the {kind}s {title}",
                principal.plural()
            ),
        }
    }
}

/// Outcome of updating a single resource's permission spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceReport {
    pub title: String,
    pub notices: Vec<Notice>,
    pub changed: bool,
}

impl ResourceReport {
    fn new(resource: &Resource) -> Self {
        Self {
            title: resource.title.clone(),
            notices: Vec::new(),
            changed: false,
        }
    }

    fn owner_skipped(&mut self, resource: &Resource, user: &User) {
        tracing::warn!(resource = %resource.id, user = %user.username, "owner permissions left unchanged");
        self.notices.push(Notice::OwnerSkipped {
            user: user.username.clone(),
            kind: resource.kind,
            title: resource.title.clone(),
        });
    }
}

/// Layer-scoped update: overwrite, or remove when `delete` is set.
///
/// Users and groups follow the same rules. When deleting, a principal with
/// no entry is left alone, and each requested permission the principal does
/// not hold yields a [`Notice::PermissionMissing`].
pub fn apply_layer_update(
    resource: &Resource,
    spec: &mut PermissionSpec,
    assignment: &Assignment<'_>,
    delete: bool,
) -> ResourceReport {
    let before = spec.clone();
    let mut report = ResourceReport::new(resource);

    for user in assignment.users {
        if resource.is_owned_by(&user.username) {
            report.owner_skipped(resource, user);
            continue;
        }
        overwrite_or_remove(
            resource,
            spec,
            PrincipalKind::User,
            &user.username,
            assignment.permissions,
            delete,
            &mut report,
        );
    }

    // Groups mirror the user branch: delete never adds a permission.
    for group in assignment.groups {
        overwrite_or_remove(
            resource,
            spec,
            PrincipalKind::Group,
            &group.name,
            assignment.permissions,
            delete,
            &mut report,
        );
    }

    report.changed = *spec != before;
    report
}

fn overwrite_or_remove(
    resource: &Resource,
    spec: &mut PermissionSpec,
    kind: PrincipalKind,
    name: &str,
    permissions: &[Permission],
    delete: bool,
    report: &mut ResourceReport,
) {
    if !delete {
        spec.set(kind, name, permissions);
        return;
    }

    let Some(removal) = spec.remove(kind, name, permissions) else {
        tracing::debug!(resource = %resource.id, %kind, name, "no entry to remove from");
        return;
    };
    for permission in removal.missing {
        report.notices.push(Notice::PermissionMissing {
            principal: kind,
            name: name.to_string(),
            permission,
            kind: resource.kind,
            title: resource.title.clone(),
        });
    }
}

/// Resource-scoped update: additive merge for every principal.
///
/// Idempotent. Layer-only permissions are dropped for maps and documents.
pub fn apply_resource_update(
    resource: &Resource,
    spec: &mut PermissionSpec,
    assignment: &Assignment<'_>,
) -> ResourceReport {
    let before = spec.clone();
    let mut report = ResourceReport::new(resource);
    let requested = applicable_permissions(resource.kind, assignment.permissions);

    for user in assignment.users {
        if resource.is_owned_by(&user.username) {
            report.owner_skipped(resource, user);
            continue;
        }
        let added = spec.merge(PrincipalKind::User, &user.username, &requested);
        tracing::debug!(resource = %resource.id, user = %user.username, added = added.len(), "merged");
    }

    for group in assignment.groups {
        let added = spec.merge(PrincipalKind::Group, &group.name, &requested);
        tracing::debug!(resource = %resource.id, group = %group.name, added = added.len(), "merged");
    }

    report.changed = *spec != before;
    report
}

/// Permissions from `requested` that apply to a resource of `kind`.
pub fn applicable_permissions(kind: ResourceKind, requested: &[Permission]) -> Vec<Permission> {
    requested
        .iter()
        .filter(|p| kind.is_layer() || !p.is_layer_only())
        .cloned()
        .collect()
}
