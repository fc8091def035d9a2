//! gtirb-recipe CLI - drive the recipe phases by hand or from CI.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("gtirb_recipe=debug")
    } else {
        EnvFilter::new("gtirb_recipe=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::Info(args) => commands::info::execute(args),
        Commands::Plan(args) => commands::plan::execute(args),
        Commands::Source(args) => commands::source::execute(args),
        Commands::Build(args) => commands::build::execute(args),
    }
}
