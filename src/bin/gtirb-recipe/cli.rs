//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// gtirb-recipe - build-orchestration recipe for the gtirb library
#[derive(Parser)]
#[command(name = "gtirb-recipe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show recipe identity and dependency declarations
    Info(InfoArgs),

    /// Resolve the build configuration and print it as JSON
    Plan(PlanArgs),

    /// Acquire the source checkout into the working area
    Source(SourceArgs),

    /// Run the configure, build, test, and install pipeline
    Build(BuildArgs),
}

/// Target settings shared by every settings-dependent command.
#[derive(Args)]
pub struct SettingsArgs {
    /// Target operating system family (defaults to the host)
    #[arg(long)]
    pub os: Option<String>,

    /// Target build type
    #[arg(long, default_value = "Release")]
    pub build_type: String,
}

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,
}

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,
}

#[derive(Args)]
pub struct SourceArgs {
    /// Working area for the checkout
    #[arg(long, default_value = ".")]
    pub work_dir: PathBuf,
}

#[derive(Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Working area holding the checkout and build tree
    #[arg(long, default_value = ".")]
    pub work_dir: PathBuf,
}
