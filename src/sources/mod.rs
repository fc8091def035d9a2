//! Source acquisition.

pub mod local;

pub use local::{LocalProjectSource, PROJECT_DIR_VAR};
