use anyhow::{bail, Context, Result};

use crate::config::Config;

pub fn run(force: bool) -> Result<()> {
    let path = Config::path().context("Failed to determine project directories")?;
    if path.exists() && !force {
        bail!("{} already exists; pass --force to overwrite it", path.display());
    }

    let written = Config::default().save()?;
    println!("Wrote default configuration to {}", written.display());
    Ok(())
}
