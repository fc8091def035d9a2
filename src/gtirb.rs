//! The gtirb recipe.
//!
//! Wires the identity, dependency declarations, source acquisition, and the
//! platform-resolved CMake pipeline into the [`Recipe`] contract.

use std::path::{Path, PathBuf};

use semver::Version;

use crate::builder::{CMakeDriver, MsvcEnv, PlatformProfile};
use crate::core::{PackageCoordinate, PlatformSettings, Recipe, RecipeIdentity};
use crate::error::Result;
use crate::sources::LocalProjectSource;

/// Recipe name; also the checkout directory under the working area.
pub const NAME: &str = "gtirb";

/// Origin path under the origin root.
pub const ORIGIN_PATH: &str = "rewriting/gtirb";

fn version() -> Version {
    Version::new(1, 8, 7)
}

/// The pinned runtime dependency.
pub fn protobuf_requirement() -> PackageCoordinate {
    PackageCoordinate::new("protobuf", Version::new(3, 9, 1), "bincrafters/stable")
}

/// Build-orchestration recipe for the gtirb library.
pub struct GtirbRecipe {
    identity: RecipeIdentity,
    settings: PlatformSettings,
    work_dir: PathBuf,
}

impl GtirbRecipe {
    /// Instantiate the recipe for the client's settings, rooted at the
    /// given working area.
    pub fn new(settings: PlatformSettings, work_dir: impl AsRef<Path>) -> Self {
        GtirbRecipe {
            identity: RecipeIdentity::new(NAME, version(), ORIGIN_PATH),
            settings,
            work_dir: work_dir.as_ref().to_path_buf(),
        }
    }

    /// Where the acquired source tree lives.
    pub fn source_dir(&self) -> PathBuf {
        self.work_dir.join(self.identity.name())
    }

    /// Where the build tree lives.
    pub fn build_dir(&self) -> PathBuf {
        self.work_dir.join("build")
    }
}

impl Recipe for GtirbRecipe {
    fn identity(&self) -> &RecipeIdentity {
        &self.identity
    }

    fn settings(&self) -> &PlatformSettings {
        &self.settings
    }

    fn requires(&self) -> Vec<PackageCoordinate> {
        vec![protobuf_requirement()]
    }

    fn build_requirements(&self) -> Vec<PackageCoordinate> {
        // Evaluated from settings alone: the client resolves build-time
        // tools before configuration runs.
        match PlatformProfile::for_settings(&self.settings) {
            PlatformProfile::Windows => vec![crate::builder::profile::ninja_build_requirement()],
            PlatformProfile::Default => Vec::new(),
        }
    }

    fn acquire_source(&self) -> Result<PathBuf> {
        LocalProjectSource::new(&self.work_dir).acquire(&self.identity)
    }

    fn build(&self) -> Result<()> {
        let profile = PlatformProfile::for_settings(&self.settings);
        let config = profile.resolve();

        tracing::debug!(
            "Resolved configuration: generator={:?}, {} definitions",
            config.generator,
            config.definitions.len()
        );

        let mut driver =
            CMakeDriver::new(self.source_dir(), self.build_dir(), self.settings.build_type)?
                .generator(config.generator)
                .definitions(config.definitions);

        if self.settings.os.is_windows() {
            let msvc = MsvcEnv::resolve()?;
            driver = driver.compiler_env(msvc.into_vars());
        }

        driver.drive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::{BuildType, OsFamily};

    fn recipe(os: OsFamily) -> GtirbRecipe {
        GtirbRecipe::new(PlatformSettings::new(os, BuildType::Release), "/tmp/work")
    }

    #[test]
    fn test_identity_strings() {
        let recipe = recipe(OsFamily::Linux);
        let id = recipe.identity();

        assert_eq!(id.description(), "gtirb library");
        assert_eq!(id.url(), "https://git.grammatech.com/rewriting/gtirb");
        assert_eq!(id.canonical_reference(), "rewriting+gtirb/stable");
        assert_eq!(id.package_coordinate(), "gtirb/1.8.7@rewriting+gtirb/stable");
    }

    #[test]
    fn test_runtime_requirement_is_pinned() {
        let requires = recipe(OsFamily::Linux).requires();

        assert_eq!(requires.len(), 1);
        assert_eq!(requires[0].to_string(), "protobuf/3.9.1@bincrafters/stable");
    }

    #[test]
    fn test_build_requirements_only_on_windows() {
        assert!(recipe(OsFamily::Linux).build_requirements().is_empty());
        assert!(recipe(OsFamily::Macos).build_requirements().is_empty());

        let windows = recipe(OsFamily::Windows).build_requirements();
        assert_eq!(windows.len(), 1);
        assert_eq!(
            windows[0].to_string(),
            "ninja_installer/1.9.0@bincrafters/stable"
        );
    }

    #[test]
    fn test_build_requirements_agree_with_resolution() {
        for os in [OsFamily::Windows, OsFamily::Linux, OsFamily::Macos, OsFamily::FreeBsd] {
            let recipe = recipe(os);
            let resolved = PlatformProfile::for_settings(recipe.settings()).resolve_with(|_| None);

            assert_eq!(recipe.build_requirements(), resolved.extra_build_requires);
        }
    }

    #[test]
    fn test_packaging_steps_are_noops() {
        let recipe = recipe(OsFamily::Linux);

        recipe.package().unwrap();
        recipe.package_info().unwrap();
    }

    #[test]
    fn test_source_layout() {
        let recipe = recipe(OsFamily::Linux);

        assert_eq!(recipe.source_dir(), PathBuf::from("/tmp/work/gtirb"));
        assert_eq!(recipe.build_dir(), PathBuf::from("/tmp/work/build"));
    }
}
