//! Platform-conditional build configuration resolution.
//!
//! This is the one piece of the recipe with branching logic: from the
//! client-supplied settings and the process environment, decide which
//! generator, compiler, preprocessor definitions, and build-time tools the
//! CMake invocation gets.

use std::collections::BTreeMap;
use std::env;

use semver::Version;
use serde::Serialize;

use crate::core::settings::PlatformSettings;
use crate::core::PackageCoordinate;

/// Definition forced on for every platform: keep build logs verbose.
pub const VERBOSE_MAKEFILE_DEF: &str = "CMAKE_VERBOSE_MAKEFILE:BOOL";

/// Environment variables merged into the Windows definition set when present.
pub const WINDOWS_ENV_DEFS: [&str; 3] = ["BOOST_ROOT", "CMAKE_PREFIX_PATH", "PYTHON"];

/// Generator used on Windows instead of the platform default.
pub const WINDOWS_GENERATOR: &str = "Ninja";

/// Compiler forced on non-Windows platforms.
pub const DEFAULT_CXX_COMPILER: &str = "g++-7";

/// The build-generator tool required on Windows, build-time only.
pub fn ninja_build_requirement() -> PackageCoordinate {
    PackageCoordinate::new("ninja_installer", Version::new(1, 9, 0), "bincrafters/stable")
}

/// A resolved build configuration.
///
/// Entirely determined by the settings and the environment snapshot it was
/// resolved from; recomputed fresh on every build invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfiguration {
    /// Generator passed to CMake, or None for the platform default.
    pub generator: Option<String>,
    /// Preprocessor/cache definitions passed as `-D` arguments.
    pub definitions: BTreeMap<String, String>,
    /// Build-time-only dependencies this configuration needs.
    pub extra_build_requires: Vec<PackageCoordinate>,
}

/// Closed set of platform profiles the recipe can resolve.
///
/// Each arm owns its generator and definition logic; adding a profile means
/// adding a variant and satisfying the match arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformProfile {
    /// Windows: Ninja generator, environment-fed definitions, no compiler
    /// override.
    Windows,
    /// Everything else: platform-default generator, pinned compiler,
    /// stripped debug symbols.
    Default,
}

impl PlatformProfile {
    /// Select the profile for the client's settings.
    pub fn for_settings(settings: &PlatformSettings) -> Self {
        if settings.os.is_windows() {
            PlatformProfile::Windows
        } else {
            PlatformProfile::Default
        }
    }

    /// Resolve the configuration against the current process environment.
    pub fn resolve(&self) -> BuildConfiguration {
        self.resolve_with(|key| env::var(key).ok())
    }

    /// Resolve the configuration against an explicit environment lookup.
    ///
    /// Set-but-empty variables count as absent: a definition is never
    /// emitted with an empty value.
    pub fn resolve_with<F>(&self, lookup: F) -> BuildConfiguration
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut definitions = BTreeMap::new();
        definitions.insert(VERBOSE_MAKEFILE_DEF.to_string(), "ON".to_string());

        match self {
            PlatformProfile::Windows => {
                for key in WINDOWS_ENV_DEFS {
                    if let Some(value) = lookup(key).filter(|v| !v.is_empty()) {
                        definitions.insert(key.to_string(), value);
                    }
                }

                BuildConfiguration {
                    generator: Some(WINDOWS_GENERATOR.to_string()),
                    definitions,
                    extra_build_requires: vec![ninja_build_requirement()],
                }
            }
            PlatformProfile::Default => {
                definitions.insert(
                    "CMAKE_CXX_COMPILER".to_string(),
                    DEFAULT_CXX_COMPILER.to_string(),
                );
                definitions.insert(
                    "GTIRB_STRIP_DEBUG_SYMBOLS:BOOL".to_string(),
                    "ON".to_string(),
                );

                BuildConfiguration {
                    generator: None,
                    definitions,
                    extra_build_requires: Vec::new(),
                }
            }
        }
    }
}
