//! ## Crate layout
//! - `core`: type specs, values, schemas, the registry and model instances.
//! - `models`: declared plot models (renderers, tickers, style mixins, grid).
//!
//! The `prelude` module exposes everything needed to declare new models and
//! to build and edit instances of the bundled ones.

pub use plotmodel_core as core;

pub mod models;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use plotmodel_core::Error;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        core::prelude::*,
        models::{Models, declare, models},
    };
}
