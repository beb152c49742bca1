//! Resolve the names typed on the command line to catalog principals.

use std::io::Write;

use geoperm_auth::{Group, User};
use geoperm_infra::Catalog;

use crate::command::CommandError;

/// Principals found in the catalog, in the order they were requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Principals {
    pub users: Vec<User>,
    pub groups: Vec<Group>,
}

impl Principals {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.groups.is_empty()
    }
}

/// Look up every requested user and group.
///
/// Unknown names are reported on `out` and skipped.
pub fn lookup_principals<C, W>(
    catalog: &C,
    usernames: &[String],
    group_names: &[String],
    out: &mut W,
) -> Result<Principals, CommandError>
where
    C: Catalog + ?Sized,
    W: Write + ?Sized,
{
    let mut found = Principals::default();

    for username in usernames {
        match catalog.find_user(username)? {
            Some(user) => found.users.push(user),
            None => {
                tracing::warn!(%username, "unknown user skipped");
                writeln!(
                    out,
                    "Warning! - The user {username} does not exists. It has been be skipped."
                )?;
            }
        }
    }

    for group_name in group_names {
        match catalog.find_group(group_name)? {
            Some(group) => found.groups.push(group),
            None => {
                tracing::warn!(group = %group_name, "unknown group skipped");
                writeln!(
                    out,
                    "Warning! - The group {group_name} does not exists. It has been skipped."
                )?;
            }
        }
    }

    Ok(found)
}
