//! `itempath shorten` – short directory for an absolute path under a root.

use anyhow::Result;
use itempath_core::path_map::shorten;
use std::path::Path;

/// Prints the short directory only; nothing is created on disk.
pub fn run_shorten(path: &Path, root: &Path) -> Result<()> {
    let short = shorten(path, root)?;
    println!("{}", short.display());
    Ok(())
}
