//! The shared update procedure behind both commands.

use std::io::Write;

use thiserror::Error;

use geoperm_auth::{
    apply_layer_update, apply_resource_update, resolve, Assignment, PermissionLevel,
    PermissionSpec, ResourceReport,
};
use geoperm_core::{Resource, ResourceKind};
use geoperm_infra::{Catalog, CatalogError, ResourceQuery};

use crate::lookup::lookup_principals;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

/// Which command is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    /// Layers only; overwrite, or remove when `delete` is set.
    Layers { delete: bool },
    /// Every resource kind; additive merge.
    Resources,
}

impl Variant {
    fn noun(&self) -> &'static str {
        match self {
            Variant::Layers { .. } => "layer",
            Variant::Resources => "resource",
        }
    }

    fn kind_filter(&self) -> Option<ResourceKind> {
        match self {
            Variant::Layers { .. } => Some(ResourceKind::Layer),
            Variant::Resources => None,
        }
    }
}

/// Normalized command input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Resource titles; empty selects every resource.
    pub titles: Vec<String>,
    pub permission: Option<String>,
    pub users: Vec<String>,
    pub groups: Vec<String>,
    pub dry_run: bool,
}

/// How a run ended. Only `Updated` touches the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NoResources,
    NoPermission,
    InvalidPermission,
    NoPrincipalsGiven,
    NoPrincipalsFound,
    Updated { resources: usize, changed: usize },
}

/// Run one command against `catalog`, reporting on `out`.
///
/// Validation failures end the run early with a message and an `Ok`
/// outcome; only catalog and output failures are errors.
pub fn run<C, W>(
    catalog: &C,
    variant: Variant,
    request: &Request,
    out: &mut W,
) -> Result<Outcome, CommandError>
where
    C: Catalog + ?Sized,
    W: Write + ?Sized,
{
    let noun = variant.noun();

    let resources = find_resources(catalog, variant, &request.titles, out)?;
    if resources.is_empty() {
        writeln!(
            out,
            "No {noun}s have been found. No update operations have been executed."
        )?;
        return Ok(Outcome::NoResources);
    }

    let Some(token) = request
        .permission
        .as_deref()
        .filter(|t| !t.trim().is_empty())
    else {
        writeln!(out, "No permissions have been provided.")?;
        return Ok(Outcome::NoPermission);
    };
    let permissions = resolve(token);
    if permissions.is_empty() {
        writeln!(out, "{}", PermissionLevel::ALLOWED_VALUES)?;
        return Ok(Outcome::InvalidPermission);
    }

    if request.users.is_empty() && request.groups.is_empty() {
        writeln!(out, "At least one user or one group must be provided.")?;
        return Ok(Outcome::NoPrincipalsGiven);
    }

    let principals = lookup_principals(catalog, &request.users, &request.groups, out)?;
    if principals.is_empty() {
        writeln!(
            out,
            "Neither users nor groups corresponding to the typed names have been found. \
             No update operations have been executed."
        )?;
        return Ok(Outcome::NoPrincipalsFound);
    }

    let assignment = Assignment {
        permissions,
        users: &principals.users,
        groups: &principals.groups,
    };

    let mut changed = 0;
    for resource in &resources {
        let mut spec = catalog.permissions(&resource.id)?;
        writeln!(
            out,
            "Initial permissions info for the {noun} {}:\n{spec}",
            resource.title
        )?;

        let report = apply(variant, resource, &mut spec, &assignment);
        for notice in &report.notices {
            writeln!(out, "{notice}")?;
        }

        if report.changed {
            changed += 1;
        }
        persist(catalog, resource, &spec, &report, request.dry_run)?;

        writeln!(
            out,
            "Final permissions info for the {noun} {}:\n{spec}",
            resource.title
        )?;
    }

    if request.dry_run {
        writeln!(out, "Dry run: no permissions have been saved.")?;
    } else {
        writeln!(out, "Permissions successfully updated!")?;
    }

    Ok(Outcome::Updated {
        resources: resources.len(),
        changed,
    })
}

fn find_resources<C, W>(
    catalog: &C,
    variant: Variant,
    titles: &[String],
    out: &mut W,
) -> Result<Vec<Resource>, CommandError>
where
    C: Catalog + ?Sized,
    W: Write + ?Sized,
{
    let query = ResourceQuery {
        titles: (!titles.is_empty()).then(|| titles.to_vec()),
        kind: variant.kind_filter(),
    };
    let resources = catalog.find_resources(&query)?;

    let unmatched: Vec<&str> = titles
        .iter()
        .filter(|t| !resources.iter().any(|r| r.title == **t))
        .map(String::as_str)
        .collect();
    if !unmatched.is_empty() {
        writeln!(
            out,
            "Warning! - No {}s have been found with these names: {}.",
            variant.noun(),
            unmatched.join(", ")
        )?;
    }

    Ok(resources)
}

fn apply(
    variant: Variant,
    resource: &Resource,
    spec: &mut PermissionSpec,
    assignment: &Assignment<'_>,
) -> ResourceReport {
    match variant {
        Variant::Layers { delete } => apply_layer_update(resource, spec, assignment, delete),
        Variant::Resources => apply_resource_update(resource, spec, assignment),
    }
}

fn persist<C>(
    catalog: &C,
    resource: &Resource,
    spec: &PermissionSpec,
    report: &ResourceReport,
    dry_run: bool,
) -> Result<(), CommandError>
where
    C: Catalog + ?Sized,
{
    if dry_run {
        tracing::info!(resource = %resource.id, title = %resource.title, changed = report.changed, "dry run, not persisted");
        return Ok(());
    }
    catalog.set_permissions(&resource.id, spec)?;
    tracing::info!(resource = %resource.id, title = %resource.title, changed = report.changed, "permissions updated");
    Ok(())
}
