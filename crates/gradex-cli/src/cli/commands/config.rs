//! Config command handlers.

use anyhow::{Context, Result};
use gradex_core::config::{Config, paths};

pub fn path() {
    println!("{}", paths::config_path().display());
}

pub fn init() -> Result<()> {
    let config_path = paths::config_path();
    let created = Config::init_at(&config_path)
        .with_context(|| format!("init config at {}", config_path.display()))?;
    if created {
        println!("Created config at {}", config_path.display());
    } else {
        anyhow::bail!("Config already exists at {}", config_path.display());
    }
    Ok(())
}
