use std::borrow::Cow;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use geoperm_core::DomainError;

/// Permission identifier.
///
/// Permissions are modeled as opaque strings (e.g. "view_resourcebase"),
/// matching the codenames the catalog stores in its access-control records.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Permissions that only make sense on layers (data and style edits).
    pub fn is_layer_only(&self) -> bool {
        LAYER_ONLY.iter().any(|p| p == self)
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

pub const VIEW_RESOURCEBASE: Permission = Permission::from_static("view_resourcebase");
pub const CHANGE_LAYER_DATA: Permission = Permission::from_static("change_layer_data");
pub const CHANGE_LAYER_STYLE: Permission = Permission::from_static("change_layer_style");
pub const CHANGE_RESOURCEBASE_METADATA: Permission =
    Permission::from_static("change_resourcebase_metadata");
pub const DOWNLOAD_RESOURCEBASE: Permission = Permission::from_static("download_resourcebase");
pub const CHANGE_RESOURCEBASE: Permission = Permission::from_static("change_resourcebase");
pub const DELETE_RESOURCEBASE: Permission = Permission::from_static("delete_resourcebase");
pub const CHANGE_RESOURCEBASE_PERMISSIONS: Permission =
    Permission::from_static("change_resourcebase_permissions");
pub const PUBLISH_RESOURCEBASE: Permission = Permission::from_static("publish_resourcebase");

static READ: &[Permission] = &[VIEW_RESOURCEBASE];

static WRITE: &[Permission] = &[
    VIEW_RESOURCEBASE,
    CHANGE_LAYER_DATA,
    CHANGE_LAYER_STYLE,
    CHANGE_RESOURCEBASE_METADATA,
];

static DOWNLOAD: &[Permission] = &[VIEW_RESOURCEBASE, DOWNLOAD_RESOURCEBASE];

static OWNER: &[Permission] = &[
    VIEW_RESOURCEBASE,
    CHANGE_LAYER_DATA,
    CHANGE_LAYER_STYLE,
    CHANGE_RESOURCEBASE_METADATA,
    DOWNLOAD_RESOURCEBASE,
    CHANGE_RESOURCEBASE,
    DELETE_RESOURCEBASE,
    CHANGE_RESOURCEBASE_PERMISSIONS,
    PUBLISH_RESOURCEBASE,
];

static LAYER_ONLY: &[Permission] = &[CHANGE_LAYER_DATA, CHANGE_LAYER_STYLE];

/// Coarse permission level accepted on the command line.
///
/// Each level expands to a fixed, ordered list of permissions. `Owner` is a
/// superset of every other level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    Read,
    Write,
    Download,
    Owner,
}

impl PermissionLevel {
    /// Message shown when a token does not name a level.
    pub const ALLOWED_VALUES: &'static str =
        "Permission must match one of these values: read (r), write (w), download (d), owner (o).";

    pub fn all() -> [PermissionLevel; 4] {
        [
            PermissionLevel::Read,
            PermissionLevel::Write,
            PermissionLevel::Download,
            PermissionLevel::Owner,
        ]
    }

    /// Parse a free-text token (`read|r|write|w|download|d|owner|o`, any case).
    pub fn from_token(token: &str) -> Option<Self> {
        match token.trim().to_lowercase().as_str() {
            "read" | "r" => Some(PermissionLevel::Read),
            "write" | "w" => Some(PermissionLevel::Write),
            "download" | "d" => Some(PermissionLevel::Download),
            "owner" | "o" => Some(PermissionLevel::Owner),
            _ => None,
        }
    }

    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            PermissionLevel::Read => READ,
            PermissionLevel::Write => WRITE,
            PermissionLevel::Download => DOWNLOAD,
            PermissionLevel::Owner => OWNER,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionLevel::Read => "read",
            PermissionLevel::Write => "write",
            PermissionLevel::Download => "download",
            PermissionLevel::Owner => "owner",
        }
    }
}

impl core::fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PermissionLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or_else(|| DomainError::validation(Self::ALLOWED_VALUES))
    }
}

/// Resolve a token to its permission list.
///
/// Unknown tokens resolve to an empty slice; callers treat that as a
/// validation failure and apply nothing.
pub fn resolve(token: &str) -> &'static [Permission] {
    PermissionLevel::from_token(token)
        .map(|level| level.permissions())
        .unwrap_or(&[])
}
