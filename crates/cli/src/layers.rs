//! `set-layers-permissions`: assign or revoke permissions on layers.

use std::io::Write;

use geoperm_infra::Catalog;

use crate::args::{normalize_names, LayersArgs};
use crate::command::{run as run_command, CommandError, Outcome, Request, Variant};

impl From<&LayersArgs> for Request {
    fn from(args: &LayersArgs) -> Self {
        Self {
            titles: normalize_names(&args.layers),
            permission: args.permission.clone(),
            users: normalize_names(&args.users),
            groups: normalize_names(&args.groups),
            dry_run: args.common.dry_run,
        }
    }
}

pub fn run<C, W>(catalog: &C, args: &LayersArgs, out: &mut W) -> Result<Outcome, CommandError>
where
    C: Catalog + ?Sized,
    W: Write + ?Sized,
{
    let variant = Variant::Layers {
        delete: args.delete,
    };
    run_command(catalog, variant, &Request::from(args), out)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use geoperm_auth::{resolve, PermissionSpec, PrincipalKind};
    use geoperm_core::{Resource, ResourceId, ResourceKind};
    use geoperm_infra::InMemoryCatalog;

    use super::*;

    fn parse(argv: &[&str]) -> LayersArgs {
        let mut full = vec!["set-layers-permissions"];
        full.extend_from_slice(argv);
        LayersArgs::try_parse_from(full).unwrap()
    }

    #[test]
    fn maps_are_not_touched_by_layer_command() {
        let map = Resource::new(ResourceId::new(), "roads", ResourceKind::Map, "admin");
        let catalog = InMemoryCatalog::new()
            .with_user("alice")
            .with_resource(map.clone(), PermissionSpec::new());
        let mut out = Vec::new();

        let outcome = run(&catalog, &parse(&["-l", "roads", "-p", "r", "-u", "alice"]), &mut out).unwrap();

        assert_eq!(outcome, Outcome::NoResources);
        assert!(catalog.permissions(&map.id).unwrap().user("alice").is_none());
    }

    #[test]
    fn delete_flag_revokes() {
        let roads = Resource::layer("roads", "admin");
        let mut spec = PermissionSpec::new();
        spec.set(PrincipalKind::User, "alice", resolve("write"));
        let catalog = InMemoryCatalog::new()
            .with_user("alice")
            .with_resource(roads.clone(), spec);
        let mut out = Vec::new();

        let outcome = run(&catalog, &parse(&["-p", "read", "-d", "-u", "alice"]), &mut out).unwrap();

        assert_eq!(outcome, Outcome::Updated { resources: 1, changed: 1 });
        let stored = catalog.permissions(&roads.id).unwrap();
        assert_eq!(&resolve("write")[1..], stored.user("alice").unwrap());
    }
}
