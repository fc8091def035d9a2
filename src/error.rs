//! Recipe error types.
//!
//! Every failure is surfaced to the calling client unmodified; the recipe
//! owns no retry or recovery policy.

use std::process::ExitStatus;

use thiserror::Error;

use crate::builder::cmake::{BuildStep, Phase};

/// Error produced while driving the recipe.
#[derive(Debug, Error)]
pub enum RecipeError {
    /// A required environment input is missing or unusable.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The external build tool exited with a failure status.
    ///
    /// The tool's own diagnostics have already been streamed to the
    /// caller's stdout/stderr; this carries only the step and status.
    #[error("cmake {step} step failed ({status})")]
    BuildTool { step: BuildStep, status: ExitStatus },

    /// A build step was requested out of pipeline order.
    #[error("cannot run the {step} step while the pipeline is {phase}")]
    Sequence { step: BuildStep, phase: Phase },

    #[error(transparent)]
    Git(#[from] git2::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RecipeError {
    /// Configuration error for a missing or empty environment variable.
    pub fn missing_env(var: &str) -> Self {
        RecipeError::Configuration(format!(
            "required environment variable `{}` is not set",
            var
        ))
    }
}

/// Convenience alias used throughout the recipe.
pub type Result<T> = std::result::Result<T, RecipeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_message() {
        let err = RecipeError::missing_env("CI_PROJECT_DIR");
        assert_eq!(
            err.to_string(),
            "configuration error: required environment variable `CI_PROJECT_DIR` is not set"
        );
    }

    #[test]
    fn test_sequence_message() {
        let err = RecipeError::Sequence {
            step: BuildStep::Build,
            phase: Phase::Unconfigured,
        };
        assert_eq!(
            err.to_string(),
            "cannot run the build step while the pipeline is unconfigured"
        );
    }
}
