//! gtirb-recipe - build orchestration for the gtirb native library.
//!
//! Given a source checkout and the client-resolved dependency locations,
//! this crate computes a platform-specific CMake configuration and drives
//! configure, build, test, and install in order. The dependency resolver,
//! CMake itself, and the artifact store are external collaborators.

pub mod builder;
pub mod core;
pub mod error;
pub mod gtirb;
pub mod sources;
pub mod util;

pub use crate::core::{
    coordinate::PackageCoordinate,
    identity::RecipeIdentity,
    recipe::Recipe,
    settings::{BuildType, OsFamily, PlatformSettings},
};

pub use crate::error::{RecipeError, Result};
pub use crate::gtirb::GtirbRecipe;
