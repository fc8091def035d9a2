//! Platform settings supplied by the calling client.
//!
//! The client resolves the dependency graph and hands the recipe the target
//! platform before any build step runs; the recipe never mutates these.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Operating system family of the build target.
///
/// The recipe's configuration only branches on Windows versus everything
/// else, but the family is kept as a closed enum so a new profile is a
/// compile-time-checked extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Windows,
    Linux,
    Macos,
    FreeBsd,
}

impl OsFamily {
    /// Detect the host operating system family.
    pub fn host() -> Self {
        if cfg!(target_os = "windows") {
            OsFamily::Windows
        } else if cfg!(target_os = "macos") {
            OsFamily::Macos
        } else if cfg!(target_os = "freebsd") {
            OsFamily::FreeBsd
        } else {
            OsFamily::Linux
        }
    }

    /// Whether this is the Windows family.
    pub fn is_windows(&self) -> bool {
        matches!(self, OsFamily::Windows)
    }

    /// Get the family name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OsFamily::Windows => "windows",
            OsFamily::Linux => "linux",
            OsFamily::Macos => "macos",
            OsFamily::FreeBsd => "freebsd",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OsFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windows" => Ok(OsFamily::Windows),
            "linux" => Ok(OsFamily::Linux),
            "macos" => Ok(OsFamily::Macos),
            "freebsd" => Ok(OsFamily::FreeBsd),
            other => Err(format!(
                "unknown os family `{}` (expected windows, linux, macos, or freebsd)",
                other
            )),
        }
    }
}

/// CMake build type for the target configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildType {
    Debug,
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    /// The value passed to `CMAKE_BUILD_TYPE`.
    pub fn as_cmake_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
            BuildType::RelWithDebInfo => "RelWithDebInfo",
            BuildType::MinSizeRel => "MinSizeRel",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_cmake_str())
    }
}

impl FromStr for BuildType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            "relwithdebinfo" => Ok(BuildType::RelWithDebInfo),
            "minsizerel" => Ok(BuildType::MinSizeRel),
            other => Err(format!(
                "unknown build type `{}` (expected Debug, Release, RelWithDebInfo, or MinSizeRel)",
                other
            )),
        }
    }
}

/// Settings the client supplies when instantiating the recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSettings {
    /// Target operating system family.
    pub os: OsFamily,
    /// Target build type.
    pub build_type: BuildType,
}

impl PlatformSettings {
    /// Create settings for the given family and build type.
    pub fn new(os: OsFamily, build_type: BuildType) -> Self {
        PlatformSettings { os, build_type }
    }
}
