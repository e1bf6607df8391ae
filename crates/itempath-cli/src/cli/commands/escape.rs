//! `itempath escape` / `itempath unescape` – apply or undo `%XX` escaping.

use anyhow::Result;
use itempath_core::PathMapper;

pub fn run_escape(mapper: &PathMapper, text: &str) -> Result<()> {
    println!("{}", mapper.escape(text));
    Ok(())
}

pub fn run_unescape(mapper: &PathMapper, text: &str) -> Result<()> {
    println!("{}", mapper.table().unescape(text));
    Ok(())
}
