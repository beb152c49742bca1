//! `geoperm-cli` — bulk permission assignment commands.
//!
//! Two commands share one procedure:
//! - `set-layers-permissions`: layers only; overwrites lists, or removes
//!   permissions with `--delete`.
//! - `set-resources-permissions`: every resource kind; additive merge.
//!
//! Validation failures never surface as errors: they are reported on the
//! output and end the run with an [`Outcome`].

pub mod args;
pub mod command;
pub mod layers;
pub mod lookup;
pub mod resources;

pub use command::{run, CommandError, Outcome, Request, Variant};
pub use lookup::{lookup_principals, Principals};
