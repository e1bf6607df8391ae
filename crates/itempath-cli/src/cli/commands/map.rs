//! `itempath map` – physical directory for a logical item path.

use anyhow::{Context, Result};
use itempath_core::PathMapper;
use std::path::Path;

/// Map `logical` under `root`, creating the short directory and its link
/// file when the path overflows. Prints the physical path.
pub fn run_map(mapper: &PathMapper, logical: &str, root: &Path) -> Result<()> {
    let physical = mapper
        .map_path(logical, root)
        .with_context(|| format!("map {} under {}", logical, root.display()))?;
    tracing::info!(logical, physical = %physical.display(), "mapped item path");
    println!("{}", physical.display());
    Ok(())
}
