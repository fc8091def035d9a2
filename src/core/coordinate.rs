//! Dependency coordinates - WHAT the recipe depends on.
//!
//! A coordinate names one exact package in the client's namespace, in the
//! `name/version@reference` form the client's resolver consumes.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use semver::Version;
use serde::{Serialize, Serializer};

/// An exact package coordinate: name, version, and origin reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageCoordinate {
    name: String,
    version: Version,
    reference: String,
}

impl PackageCoordinate {
    /// Create a new coordinate.
    pub fn new(
        name: impl Into<String>,
        version: Version,
        reference: impl Into<String>,
    ) -> Self {
        PackageCoordinate {
            name: name.into(),
            version,
            reference: reference.into(),
        }
    }

    /// Get the package name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the pinned version.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Get the origin reference (e.g. `bincrafters/stable`).
    pub fn reference(&self) -> &str {
        &self.reference
    }
}

impl fmt::Display for PackageCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.name, self.version, self.reference)
    }
}

impl FromStr for PackageCoordinate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (spec, reference) = match s.split_once('@') {
            Some(parts) => parts,
            None => bail!("invalid coordinate `{}`: missing `@reference`", s),
        };

        let (name, version) = match spec.split_once('/') {
            Some(parts) => parts,
            None => bail!("invalid coordinate `{}`: missing `/version`", s),
        };

        if name.is_empty() || reference.is_empty() {
            bail!("invalid coordinate `{}`: empty name or reference", s);
        }

        let version = version
            .parse::<Version>()
            .with_context(|| format!("invalid version in coordinate `{}`", s))?;

        Ok(PackageCoordinate::new(name, version, reference))
    }
}

impl Serialize for PackageCoordinate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
