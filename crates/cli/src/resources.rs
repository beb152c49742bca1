//! `set-resources-permissions`: merge permissions into any resource kind.

use std::io::Write;

use geoperm_infra::Catalog;

use crate::args::{normalize_names, ResourcesArgs};
use crate::command::{run as run_command, CommandError, Outcome, Request, Variant};

impl From<&ResourcesArgs> for Request {
    fn from(args: &ResourcesArgs) -> Self {
        Self {
            titles: normalize_names(&args.resources),
            permission: args.permission.clone(),
            users: normalize_names(&args.users),
            groups: normalize_names(&args.groups),
            dry_run: args.common.dry_run,
        }
    }
}

pub fn run<C, W>(catalog: &C, args: &ResourcesArgs, out: &mut W) -> Result<Outcome, CommandError>
where
    C: Catalog + ?Sized,
    W: Write + ?Sized,
{
    run_command(catalog, Variant::Resources, &Request::from(args), out)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use geoperm_auth::{resolve, PermissionSpec};
    use geoperm_core::{Resource, ResourceId, ResourceKind};
    use geoperm_infra::InMemoryCatalog;

    use super::*;

    #[test]
    fn merges_into_documents_without_layer_permissions() {
        let doc = Resource::new(ResourceId::new(), "survey", ResourceKind::Document, "admin");
        let catalog = InMemoryCatalog::new()
            .with_group("editors")
            .with_resource(doc.clone(), PermissionSpec::new());
        let args = ResourcesArgs::try_parse_from([
            "set-resources-permissions",
            "-r",
            "survey",
            "-p",
            "owner",
            "-g",
            "editors",
        ])
        .unwrap();
        let mut out = Vec::new();

        let outcome = run(&catalog, &args, &mut out).unwrap();

        assert_eq!(outcome, Outcome::Updated { resources: 1, changed: 1 });
        let stored = catalog.permissions(&doc.id).unwrap();
        let expected: Vec<_> = resolve("owner")
            .iter()
            .filter(|p| !p.is_layer_only())
            .cloned()
            .collect();
        assert_eq!(stored.group("editors").unwrap(), expected.as_slice());
    }
}
