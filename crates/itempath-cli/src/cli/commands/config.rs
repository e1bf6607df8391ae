//! `itempath config` – show the effective configuration.

use anyhow::Result;
use itempath_core::config::MapperConfig;
use std::path::Path;

pub fn run_config(cfg: &MapperConfig, source: &Path) -> Result<()> {
    println!("# {}", source.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    println!("# split threshold: {}", cfg.threshold()?);
    Ok(())
}
