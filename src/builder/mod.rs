//! Configuration resolution and the CMake build driver.

pub mod cmake;
pub mod profile;
pub mod vcvars;

pub use cmake::{BuildStep, CMakeDriver, Phase};
pub use profile::{BuildConfiguration, PlatformProfile};
pub use vcvars::MsvcEnv;
