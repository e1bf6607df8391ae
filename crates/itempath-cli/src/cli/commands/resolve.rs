//! `itempath resolve` – logical item path for a physical directory.

use anyhow::{Context, Result};
use itempath_core::PathMapper;
use std::path::Path;

pub fn run_resolve(mapper: &PathMapper, physical: &Path, root: &Path) -> Result<()> {
    let logical = mapper
        .logical_path(physical, root)
        .with_context(|| format!("resolve {}", physical.display()))?;
    println!("{}", logical);
    Ok(())
}
