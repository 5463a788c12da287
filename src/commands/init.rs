//! The `init` command: write a default `.asklytics.toml`.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;

use crate::config::default_config_toml;

pub const CONFIG_FILE_NAME: &str = ".asklytics.toml";

pub fn init_config(force: bool) -> Result<()> {
    let path = Path::new(CONFIG_FILE_NAME);

    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            CONFIG_FILE_NAME
        );
    }

    fs::write(path, default_config_toml())
        .with_context(|| format!("writing {}", CONFIG_FILE_NAME))?;
    println!("Wrote {}", CONFIG_FILE_NAME);
    Ok(())
}
