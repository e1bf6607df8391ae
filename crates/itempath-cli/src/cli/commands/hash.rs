//! `itempath hash` – short directory name for a string.

use anyhow::Result;
use itempath_core::path_map::reduce;

pub fn run_hash(text: &str) -> Result<()> {
    println!("{}", reduce(text));
    Ok(())
}
