//! `gtirb-recipe source` command

use anyhow::Result;
use gtirb_recipe::{BuildType, GtirbRecipe, OsFamily, PlatformSettings, Recipe};

use crate::cli::SourceArgs;

pub fn execute(args: SourceArgs) -> Result<()> {
    // Acquisition does not depend on the target settings
    let settings = PlatformSettings::new(OsFamily::host(), BuildType::Release);
    let recipe = GtirbRecipe::new(settings, &args.work_dir);

    let checkout = recipe.acquire_source()?;
    eprintln!("acquired {} at {}", recipe.identity().name(), checkout.display());

    Ok(())
}
