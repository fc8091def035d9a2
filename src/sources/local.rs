//! Local project source - environment-driven checkout acquisition.
//!
//! The execution environment names a local project directory; acquisition
//! clones it into the working area under the recipe's name. No network, no
//! retries: a missing variable or unreadable path is fatal immediately.

use std::env;
use std::path::{Path, PathBuf};

use git2::Repository;

use crate::core::identity::RecipeIdentity;
use crate::error::{RecipeError, Result};

/// Environment variable naming the local project directory to clone.
pub const PROJECT_DIR_VAR: &str = "CI_PROJECT_DIR";

/// Acquires the recipe's source tree from a local project directory.
pub struct LocalProjectSource {
    work_dir: PathBuf,
}

impl LocalProjectSource {
    /// Create a source rooted at the given working area.
    pub fn new(work_dir: impl AsRef<Path>) -> Self {
        LocalProjectSource {
            work_dir: work_dir.as_ref().to_path_buf(),
        }
    }

    /// Clone the environment-named project directory into
    /// `<work_dir>/<name>`, returning the checkout location.
    pub fn acquire(&self, identity: &RecipeIdentity) -> Result<PathBuf> {
        self.acquire_with(identity, |key| env::var(key).ok())
    }

    /// Acquire against an explicit environment lookup.
    pub fn acquire_with<F>(&self, identity: &RecipeIdentity, lookup: F) -> Result<PathBuf>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project_dir = lookup(PROJECT_DIR_VAR)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| RecipeError::missing_env(PROJECT_DIR_VAR))?;

        let checkout = self.work_dir.join(identity.name());

        tracing::info!("Cloning {} into {}", project_dir, checkout.display());
        Repository::clone(&project_dir, &checkout)?;

        Ok(checkout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;
    use tempfile::TempDir;

    fn gtirb_identity() -> RecipeIdentity {
        RecipeIdentity::new("gtirb", Version::new(1, 8, 7), "rewriting/gtirb")
    }

    fn init_project(dir: &Path) {
        std::fs::write(dir.join("CMakeLists.txt"), "project(gtirb)").unwrap();

        let repo = Repository::init(dir).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("CMakeLists.txt")).unwrap();
        index.write().unwrap();
        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = git2::Signature::now("ci", "ci@example.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "initial", &tree, &[])
            .unwrap();
    }

    #[test]
    fn test_missing_variable_fails_without_mutation() {
        let tmp = TempDir::new().unwrap();
        let source = LocalProjectSource::new(tmp.path());

        let err = source
            .acquire_with(&gtirb_identity(), |_| None)
            .unwrap_err();
        assert!(matches!(err, RecipeError::Configuration(_)));
        assert!(err.to_string().contains(PROJECT_DIR_VAR));

        // Nothing was written into the working area
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_empty_variable_counts_as_absent() {
        let tmp = TempDir::new().unwrap();
        let source = LocalProjectSource::new(tmp.path());

        let err = source
            .acquire_with(&gtirb_identity(), |_| Some(String::new()))
            .unwrap_err();
        assert!(matches!(err, RecipeError::Configuration(_)));
    }

    #[test]
    fn test_clones_project_under_recipe_name() {
        let project = TempDir::new().unwrap();
        init_project(project.path());

        let work = TempDir::new().unwrap();
        let source = LocalProjectSource::new(work.path());

        let project_dir = project.path().to_string_lossy().into_owned();
        let checkout = source
            .acquire_with(&gtirb_identity(), |key| {
                (key == PROJECT_DIR_VAR).then(|| project_dir.clone())
            })
            .unwrap();

        assert_eq!(checkout, work.path().join("gtirb"));
        assert!(checkout.join("CMakeLists.txt").exists());
    }
}
