//! Command implementations

pub mod build;
pub mod info;
pub mod plan;
pub mod source;

use anyhow::Result;
use gtirb_recipe::{OsFamily, PlatformSettings};

use crate::cli::SettingsArgs;

/// Parse the shared settings flags, defaulting the OS to the host family.
pub(crate) fn parse_settings(args: &SettingsArgs) -> Result<PlatformSettings> {
    let os = match args.os {
        Some(ref os) => os.parse().map_err(|e| anyhow::anyhow!("{}", e))?,
        None => OsFamily::host(),
    };

    let build_type = args
        .build_type
        .parse()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(PlatformSettings::new(os, build_type))
}
