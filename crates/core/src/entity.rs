//! Catalog entities are addressed by id, never by title.

/// Something the catalog stores under a stable identifier.
///
/// Titles can repeat across resources, so stores match records on `id()`.
pub trait Entity {
    type Id: Copy + Eq + core::fmt::Display;

    fn id(&self) -> &Self::Id;
}
