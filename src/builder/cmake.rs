//! CMake build driver.
//!
//! Drives one CMake project through configure, build, test, and install as
//! strictly sequential external invocations. There is no backward
//! transition and no skipping: a failed step leaves the pipeline where it
//! was, and every later step is refused.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::core::settings::BuildType;
use crate::error::{RecipeError, Result};
use crate::util::process::{find_cmake, ProcessBuilder};

/// Pipeline position of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Unconfigured,
    Configured,
    Built,
    Tested,
    Installed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Unconfigured => "unconfigured",
            Phase::Configured => "configured",
            Phase::Built => "built",
            Phase::Tested => "tested",
            Phase::Installed => "installed",
        };
        write!(f, "{}", name)
    }
}

/// One external build-tool invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStep {
    Configure,
    Build,
    Test,
    Install,
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BuildStep::Configure => "configure",
            BuildStep::Build => "build",
            BuildStep::Test => "test",
            BuildStep::Install => "install",
        };
        write!(f, "{}", name)
    }
}

/// Sequential CMake driver for one source tree.
#[derive(Debug, Clone)]
pub struct CMakeDriver {
    cmake: PathBuf,
    source_dir: PathBuf,
    build_dir: PathBuf,
    build_type: BuildType,
    generator: Option<String>,
    definitions: BTreeMap<String, String>,
    compiler_env: Vec<(String, String)>,
    phase: Phase,
}

impl CMakeDriver {
    /// Create a new driver for the given source tree.
    pub fn new(source_dir: PathBuf, build_dir: PathBuf, build_type: BuildType) -> Result<Self> {
        let cmake = find_cmake().ok_or_else(|| {
            RecipeError::Configuration("cmake not found in PATH".to_string())
        })?;

        Ok(CMakeDriver {
            cmake,
            source_dir,
            build_dir,
            build_type,
            generator: None,
            definitions: BTreeMap::new(),
            compiler_env: Vec::new(),
            phase: Phase::Unconfigured,
        })
    }

    /// Override the cmake executable.
    pub fn with_cmake(mut self, cmake: PathBuf) -> Self {
        self.cmake = cmake;
        self
    }

    /// Set the generator, or None for the platform default.
    pub fn generator(mut self, generator: Option<String>) -> Self {
        self.generator = generator;
        self
    }

    /// Set the cache definitions passed at configure time.
    pub fn definitions(mut self, definitions: BTreeMap<String, String>) -> Self {
        self.definitions = definitions;
        self
    }

    /// Set a compiler environment applied to every invocation.
    ///
    /// The environment is scoped to this driver: it is handed to each child
    /// process and never written into the recipe's own process environment.
    pub fn compiler_env(mut self, env: Vec<(String, String)>) -> Self {
        self.compiler_env = env;
        self
    }

    /// Get the current pipeline phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Run the configure step.
    pub fn configure(&mut self) -> Result<()> {
        if self.phase != Phase::Unconfigured {
            return Err(RecipeError::Sequence {
                step: BuildStep::Configure,
                phase: self.phase,
            });
        }

        fs::create_dir_all(&self.build_dir)?;

        let mut cmd = ProcessBuilder::new(&self.cmake)
            .arg("-S")
            .arg(&self.source_dir)
            .arg("-B")
            .arg(&self.build_dir);

        if let Some(ref generator) = self.generator {
            cmd = cmd.arg("-G").arg(generator);
        }

        cmd = cmd.arg(format!("-DCMAKE_BUILD_TYPE={}", self.build_type));

        for (key, value) in &self.definitions {
            cmd = cmd.arg(format!("-D{}={}", key, value));
        }

        self.run_step(BuildStep::Configure, Phase::Configured, cmd)
    }

    /// Run the build step.
    pub fn build(&mut self) -> Result<()> {
        if self.phase != Phase::Configured {
            return Err(RecipeError::Sequence {
                step: BuildStep::Build,
                phase: self.phase,
            });
        }

        let cmd = ProcessBuilder::new(&self.cmake)
            .arg("--build")
            .arg(&self.build_dir);

        self.run_step(BuildStep::Build, Phase::Built, cmd)
    }

    /// Run the test step.
    pub fn test(&mut self) -> Result<()> {
        if self.phase != Phase::Built {
            return Err(RecipeError::Sequence {
                step: BuildStep::Test,
                phase: self.phase,
            });
        }

        let cmd = ProcessBuilder::new(&self.cmake)
            .arg("--build")
            .arg(&self.build_dir)
            .args(["--target", "test"]);

        self.run_step(BuildStep::Test, Phase::Tested, cmd)
    }

    /// Run the install step.
    pub fn install(&mut self) -> Result<()> {
        if self.phase != Phase::Tested {
            return Err(RecipeError::Sequence {
                step: BuildStep::Install,
                phase: self.phase,
            });
        }

        let cmd = ProcessBuilder::new(&self.cmake)
            .arg("--build")
            .arg(&self.build_dir)
            .args(["--target", "install"]);

        self.run_step(BuildStep::Install, Phase::Installed, cmd)
    }

    /// Drive all four steps in order, stopping at the first failure.
    pub fn drive(&mut self) -> Result<()> {
        self.configure()?;
        self.build()?;
        self.test()?;
        self.install()?;
        Ok(())
    }

    fn run_step(&mut self, step: BuildStep, next: Phase, cmd: ProcessBuilder) -> Result<()> {
        let cmd = cmd.envs(&self.compiler_env);

        tracing::info!("Running {} step: {}", step, cmd.display_command());

        let status = cmd.status()?;
        if !status.success() {
            return Err(RecipeError::BuildTool { step, status });
        }

        self.phase = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn fake_cmake(dir: &std::path::Path, exit_code: i32, log: &std::path::Path) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let script = dir.join("cmake");
        let body = format!(
            "#!/bin/sh\necho \"$@\" >> \"{}\"\nexit {}\n",
            log.display(),
            exit_code
        );
        fs::write(&script, body).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    fn driver(tmp: &TempDir, cmake: PathBuf) -> CMakeDriver {
        CMakeDriver {
            cmake,
            source_dir: tmp.path().join("gtirb"),
            build_dir: tmp.path().join("build"),
            build_type: BuildType::Release,
            generator: None,
            definitions: BTreeMap::new(),
            compiler_env: Vec::new(),
            phase: Phase::Unconfigured,
        }
    }

    #[test]
    fn test_build_refused_before_configure() {
        let tmp = TempDir::new().unwrap();
        let mut driver = driver(&tmp, PathBuf::from("cmake"));

        let err = driver.build().unwrap_err();
        assert!(matches!(
            err,
            RecipeError::Sequence {
                step: BuildStep::Build,
                phase: Phase::Unconfigured,
            }
        ));

        let err = driver.install().unwrap_err();
        assert!(matches!(err, RecipeError::Sequence { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_drive_runs_all_steps_in_order() {
        let tmp = TempDir::new().unwrap();
        let log = tmp.path().join("invocations.log");
        let cmake = fake_cmake(tmp.path(), 0, &log);

        let mut driver = driver(&tmp, cmake).generator(Some("Ninja".to_string()));
        driver.drive().unwrap();
        assert_eq!(driver.phase(), Phase::Installed);

        let log = fs::read_to_string(&log).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("-S") && lines[0].contains("-G Ninja"));
        assert!(lines[0].contains("-DCMAKE_BUILD_TYPE=Release"));
        assert!(lines[1].ends_with(&format!("--build {}", tmp.path().join("build").display())));
        assert!(lines[2].contains("--target test"));
        assert!(lines[3].contains("--target install"));
    }

    #[cfg(unix)]
    #[test]
    fn test_configure_passes_definitions() {
        let tmp = TempDir::new().unwrap();
        let log = tmp.path().join("invocations.log");
        let cmake = fake_cmake(tmp.path(), 0, &log);

        let mut defs = BTreeMap::new();
        defs.insert("CMAKE_VERBOSE_MAKEFILE:BOOL".to_string(), "ON".to_string());

        let mut driver = driver(&tmp, cmake).definitions(defs);
        driver.configure().unwrap();

        let log = fs::read_to_string(&log).unwrap();
        assert!(log.contains("-DCMAKE_VERBOSE_MAKEFILE:BOOL=ON"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_step_halts_the_pipeline() {
        let tmp = TempDir::new().unwrap();
        let log = tmp.path().join("invocations.log");
        let cmake = fake_cmake(tmp.path(), 1, &log);

        let mut driver = driver(&tmp, cmake);

        let err = driver.drive().unwrap_err();
        assert!(matches!(
            err,
            RecipeError::BuildTool {
                step: BuildStep::Configure,
                ..
            }
        ));
        assert_eq!(driver.phase(), Phase::Unconfigured);

        // Only the failing invocation ran
        let log = fs::read_to_string(&log).unwrap();
        assert_eq!(log.lines().count(), 1);

        // Later steps stay refused
        assert!(matches!(driver.build(), Err(RecipeError::Sequence { .. })));
        assert!(matches!(driver.test(), Err(RecipeError::Sequence { .. })));
    }
}
