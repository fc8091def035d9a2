//! Recipe identity - WHO the recipe builds (name + version + origin).
//!
//! The calling client uses the derived strings to identify and cache the
//! built artifact, so their exact shape is part of the protocol contract:
//! changing a template breaks cache and lookup consistency across recipe
//! versions.

use std::fmt;

use semver::Version;

/// Root of the origin URL namespace for all recipes.
pub const ORIGIN_ROOT: &str = "https://git.grammatech.com";

/// Channel suffix appended to every canonical reference.
pub const CHANNEL: &str = "stable";

/// Immutable identity of a recipe: name, version, and origin path.
///
/// Every other identity string is a pure function of these three fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeIdentity {
    name: String,
    version: Version,
    origin_path: String,
}

impl RecipeIdentity {
    /// Create a new recipe identity.
    pub fn new(name: impl Into<String>, version: Version, origin_path: impl Into<String>) -> Self {
        RecipeIdentity {
            name: name.into(),
            version,
            origin_path: origin_path.into(),
        }
    }

    /// Get the recipe name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the recipe version.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Get the origin path relative to the origin root.
    pub fn origin_path(&self) -> &str {
        &self.origin_path
    }

    /// Human-readable description: `"<name> library"`.
    pub fn description(&self) -> String {
        format!("{} library", self.name)
    }

    /// Upstream project URL: `"<origin root>/<origin path>"`.
    pub fn url(&self) -> String {
        format!("{}/{}", ORIGIN_ROOT, self.origin_path)
    }

    /// Canonical reference: the origin path with path separators escaped to
    /// `+`, suffixed with the channel.
    ///
    /// The coordinate namespace cannot contain `/` inside a reference
    /// segment, so `+` is the chosen escape.
    pub fn canonical_reference(&self) -> String {
        format!("{}/{}", self.origin_path.replace('/', "+"), CHANNEL)
    }

    /// Full package coordinate: `"<name>/<version>@<canonical reference>"`.
    pub fn package_coordinate(&self) -> String {
        format!("{}/{}@{}", self.name, self.version, self.canonical_reference())
    }
}

impl fmt::Display for RecipeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.package_coordinate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gtirb_identity() -> RecipeIdentity {
        RecipeIdentity::new("gtirb", Version::new(1, 8, 7), "rewriting/gtirb")
    }

    #[test]
    fn test_description() {
        assert_eq!(gtirb_identity().description(), "gtirb library");
    }

    #[test]
    fn test_url() {
        assert_eq!(
            gtirb_identity().url(),
            "https://git.grammatech.com/rewriting/gtirb"
        );
    }

    #[test]
    fn test_canonical_reference() {
        assert_eq!(gtirb_identity().canonical_reference(), "rewriting+gtirb/stable");
    }

    #[test]
    fn test_package_coordinate() {
        assert_eq!(
            gtirb_identity().package_coordinate(),
            "gtirb/1.8.7@rewriting+gtirb/stable"
        );
    }

    #[test]
    fn test_derivations_are_idempotent() {
        let id = gtirb_identity();

        assert_eq!(id.description(), id.description());
        assert_eq!(id.url(), id.url());
        assert_eq!(id.canonical_reference(), id.canonical_reference());
        assert_eq!(id.package_coordinate(), id.package_coordinate());
    }
}
