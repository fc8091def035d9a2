//! The recipe contract driven by the packaging client.

use std::path::PathBuf;

use crate::core::coordinate::PackageCoordinate;
use crate::core::identity::RecipeIdentity;
use crate::core::settings::PlatformSettings;
use crate::error::Result;

/// One library's obtain/configure/build/test/install unit, for one
/// platform/settings combination.
///
/// The client calls these in a fixed order: identity lookups first, then
/// `build_requirements` (before source acquisition, so build-time tools can
/// be resolved in the client's earlier phase), then `acquire_source`, then
/// `build`, then the packaging steps.
pub trait Recipe {
    /// The recipe's immutable identity.
    fn identity(&self) -> &RecipeIdentity;

    /// The settings the client instantiated the recipe with.
    fn settings(&self) -> &PlatformSettings;

    /// Runtime dependencies, pinned to exact coordinates.
    fn requires(&self) -> Vec<PackageCoordinate>;

    /// Build-time-only dependencies for the current settings.
    fn build_requirements(&self) -> Vec<PackageCoordinate>;

    /// Obtain a working copy of the source tree, returning its location.
    fn acquire_source(&self) -> Result<PathBuf>;

    /// Resolve the build configuration and drive the external build tool
    /// through configure, build, test, and install.
    fn build(&self) -> Result<()>;

    /// Stage artifacts for packaging.
    ///
    /// The build tool's install step already placed artifacts at their
    /// final location, so there is nothing to re-stage.
    fn package(&self) -> Result<()> {
        Ok(())
    }

    /// Report artifact metadata to the client.
    ///
    /// Intentionally empty for the same reason as [`Recipe::package`].
    fn package_info(&self) -> Result<()> {
        Ok(())
    }
}
