//! `gtirb-recipe info` command

use anyhow::Result;
use gtirb_recipe::{GtirbRecipe, Recipe};

use crate::cli::InfoArgs;
use crate::commands::parse_settings;

pub fn execute(args: InfoArgs) -> Result<()> {
    let settings = parse_settings(&args.settings)?;
    let recipe = GtirbRecipe::new(settings, ".");
    let id = recipe.identity();

    println!("name:        {}", id.name());
    println!("version:     {}", id.version());
    println!("description: {}", id.description());
    println!("url:         {}", id.url());
    println!("reference:   {}", id.canonical_reference());
    println!("coordinate:  {}", id.package_coordinate());
    println!("settings:    os={}, build_type={}", settings.os, settings.build_type);

    for req in recipe.requires() {
        println!("requires:       {}", req);
    }
    for req in recipe.build_requirements() {
        println!("build requires: {}", req);
    }

    Ok(())
}
