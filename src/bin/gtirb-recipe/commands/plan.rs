//! `gtirb-recipe plan` command

use anyhow::Result;
use gtirb_recipe::builder::PlatformProfile;

use crate::cli::PlanArgs;
use crate::commands::parse_settings;

pub fn execute(args: PlanArgs) -> Result<()> {
    let settings = parse_settings(&args.settings)?;
    let config = PlatformProfile::for_settings(&settings).resolve();

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}
