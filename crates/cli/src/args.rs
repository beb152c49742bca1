//! Command-line arguments of both commands.

use std::path::PathBuf;

use clap::{Args, Parser};

/// Flags shared by both commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Catalog file to operate on (overrides GEOPERM_CATALOG).
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Print the resulting permissions without persisting them.
    #[arg(long)]
    pub dry_run: bool,
}

/// Set permissions to layers for users and groups.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "set-layers-permissions",
    version,
    long_about = "Set permissions to layers for users and groups.\n\n\
        At least one user or one group is required.\n\
        If no layers are typed all the layers will be considered.\n\
        At least one permission must be typed.\n\
        The delete flag means that the permissions will be unset.\n\
        Multiple inputs can be typed with white space separator."
)]
pub struct LayersArgs {
    /// Layer titles to update (default: all layers). Quote titles containing spaces.
    #[arg(short = 'l', long = "layers", num_args = 0.., value_name = "TITLE")]
    pub layers: Vec<String>,

    /// Permission to assign: read (r), write (w), download (d) or owner (o).
    #[arg(short = 'p', long = "permission", value_name = "LEVEL")]
    pub permission: Option<String>,

    /// Remove the permission instead of assigning it.
    #[arg(short = 'd', long = "delete")]
    pub delete: bool,

    /// Users to update.
    #[arg(short = 'u', long = "users", num_args = 0.., value_name = "USERNAME")]
    pub users: Vec<String>,

    /// Groups to update.
    #[arg(short = 'g', long = "groups", num_args = 0.., value_name = "GROUP")]
    pub groups: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Add permissions on catalog resources for users and groups.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "set-resources-permissions",
    version,
    long_about = "Add permissions on catalog resources (layers, maps, documents) for users and groups.\n\n\
        Permissions are merged into the existing ones; nothing is removed.\n\
        If no resources are typed all the resources will be considered.\n\
        Multiple inputs can be typed with comma separator."
)]
pub struct ResourcesArgs {
    /// Resource titles to update, comma separated (default: all resources).
    #[arg(short = 'r', long = "resources", value_delimiter = ',', num_args = 0.., value_name = "TITLES")]
    pub resources: Vec<String>,

    /// Permission to assign: read (r), write (w), download (d) or owner (o).
    #[arg(short = 'p', long = "permission", value_name = "LEVEL")]
    pub permission: Option<String>,

    /// Users to update, comma separated.
    #[arg(short = 'u', long = "users", value_delimiter = ',', num_args = 0.., value_name = "USERNAMES")]
    pub users: Vec<String>,

    /// Groups to update, comma separated.
    #[arg(short = 'g', long = "groups", value_delimiter = ',', num_args = 0.., value_name = "GROUPS")]
    pub groups: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Trim each name and drop empty ones (stray commas, blank quotes).
pub fn normalize_names(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}
