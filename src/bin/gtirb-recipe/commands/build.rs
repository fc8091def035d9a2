//! `gtirb-recipe build` command

use anyhow::{bail, Result};
use gtirb_recipe::{GtirbRecipe, Recipe};

use crate::cli::BuildArgs;
use crate::commands::parse_settings;

pub fn execute(args: BuildArgs) -> Result<()> {
    let settings = parse_settings(&args.settings)?;
    let recipe = GtirbRecipe::new(settings, &args.work_dir);

    let source_dir = recipe.source_dir();
    if !source_dir.exists() {
        bail!(
            "source checkout not found at {}\n\
             help: run `gtirb-recipe source` first",
            source_dir.display()
        );
    }

    recipe.build()?;
    recipe.package()?;
    recipe.package_info()?;

    eprintln!("installed {}", recipe.identity().package_coordinate());

    Ok(())
}
