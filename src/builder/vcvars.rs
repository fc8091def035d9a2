//! Scoped MSVC compiler environment for Windows builds.
//!
//! CMake needs the MSVC toolchain variables (INCLUDE, LIB, PATH, ...) when
//! driving a Ninja build on Windows. Instead of mutating the recipe's own
//! process environment, the resolved variables are carried as a value and
//! handed to each build-tool invocation, so the scope ends with the driver
//! on every exit path.

use std::env;
use std::fs;
use std::path::PathBuf;

use crate::error::{RecipeError, Result};
use crate::util::process::{find_executable, ProcessBuilder};

/// Target architecture passed to vcvarsall. The client settings carry no
/// architecture, so the recipe builds for x64.
const VCVARS_ARCH: &str = "x64";

/// The compiler environment produced by vcvarsall.bat.
///
/// Resolution always re-runs vcvarsall rather than trusting any
/// already-initialized ambient state, and the captured block is applied
/// without path deduplication or filtering.
#[derive(Debug, Clone)]
pub struct MsvcEnv {
    vars: Vec<(String, String)>,
}

impl MsvcEnv {
    /// Resolve the compiler environment from the local Visual Studio
    /// installation.
    pub fn resolve() -> Result<Self> {
        let vcvarsall = locate_vcvarsall()?;

        tracing::info!("Resolving MSVC environment via {}", vcvarsall.display());

        // A wrapper batch file avoids cmd.exe quoting issues around the
        // installation path.
        let batch = env::temp_dir().join("gtirb-recipe-vcvars.bat");
        let body = format!(
            "@echo off\r\ncall \"{}\" {} >nul 2>&1\r\nif errorlevel 1 exit /b 1\r\nset\r\n",
            vcvarsall.display(),
            VCVARS_ARCH
        );
        fs::write(&batch, body)?;

        let output = ProcessBuilder::new("cmd").arg("/c").arg(&batch).exec();
        let _ = fs::remove_file(&batch);

        let output = output?;
        if !output.status.success() {
            return Err(RecipeError::Configuration(format!(
                "vcvarsall.bat failed for {}: {}",
                VCVARS_ARCH,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let vars = parse_env_block(&String::from_utf8_lossy(&output.stdout));
        if vars.is_empty() {
            return Err(RecipeError::Configuration(
                "vcvarsall.bat produced no environment".to_string(),
            ));
        }

        Ok(MsvcEnv { vars })
    }

    /// The captured environment variables, unfiltered.
    pub fn vars(&self) -> &[(String, String)] {
        &self.vars
    }

    /// Consume the scope, yielding the variables for the build driver.
    pub fn into_vars(self) -> Vec<(String, String)> {
        self.vars
    }
}

/// Locate vcvarsall.bat via VCINSTALLDIR, then vswhere.
fn locate_vcvarsall() -> Result<PathBuf> {
    if let Ok(vc_dir) = env::var("VCINSTALLDIR") {
        if !vc_dir.is_empty() {
            let candidate = PathBuf::from(vc_dir)
                .join("Auxiliary")
                .join("Build")
                .join("vcvarsall.bat");
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }

    if let Some(vswhere) = find_vswhere() {
        let output = ProcessBuilder::new(&vswhere)
            .args([
                "-latest",
                "-requires",
                "Microsoft.VisualStudio.Component.VC.Tools.x86.x64",
                "-property",
                "installationPath",
                "-format",
                "value",
            ])
            .exec()?;

        if output.status.success() {
            let vs_path = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !vs_path.is_empty() {
                let candidate = PathBuf::from(vs_path)
                    .join("VC")
                    .join("Auxiliary")
                    .join("Build")
                    .join("vcvarsall.bat");
                if candidate.exists() {
                    return Ok(candidate);
                }
            }
        }
    }

    Err(RecipeError::Configuration(
        "could not locate vcvarsall.bat (set VCINSTALLDIR or install vswhere)".to_string(),
    ))
}

fn find_vswhere() -> Option<PathBuf> {
    if let Some(path) = find_executable("vswhere") {
        return Some(path);
    }

    let program_files = env::var("ProgramFiles(x86)")
        .unwrap_or_else(|_| "C:\\Program Files (x86)".to_string());
    let standard = PathBuf::from(program_files)
        .join("Microsoft Visual Studio")
        .join("Installer")
        .join("vswhere.exe");

    standard.exists().then_some(standard)
}

/// Parse the `KEY=VALUE` lines printed by `set`.
fn parse_env_block(output: &str) -> Vec<(String, String)> {
    output
        .lines()
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_block() {
        let block = "PATH=C:\\VC\\bin;C:\\Windows\r\nINCLUDE=C:\\VC\\include\r\nnot a variable\r\n";
        let vars = parse_env_block(block);

        assert_eq!(vars.len(), 2);
        assert_eq!(vars[0].0, "PATH");
        assert!(vars[0].1.contains("C:\\VC\\bin"));
        assert_eq!(vars[1], ("INCLUDE".to_string(), "C:\\VC\\include".to_string()));
    }

    #[test]
    fn test_parse_env_block_keeps_duplicate_paths() {
        // Filtering is disabled: repeated entries survive verbatim
        let block = "PATH=C:\\a;C:\\a;C:\\b\n";
        let vars = parse_env_block(block);

        assert_eq!(vars[0].1, "C:\\a;C:\\a;C:\\b");
    }
}
