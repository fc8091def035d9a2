//! Core domain model: recipe identity, client settings, dependency
//! coordinates, and the recipe contract.

pub mod coordinate;
pub mod identity;
pub mod recipe;
pub mod settings;

pub use coordinate::PackageCoordinate;
pub use identity::RecipeIdentity;
pub use recipe::Recipe;
pub use settings::{BuildType, OsFamily, PlatformSettings};
