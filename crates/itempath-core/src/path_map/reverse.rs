//! Reverse mapping: physical directory back to its logical item path.
//!
//! A short directory can only appear as the first component below the root,
//! since mapping splits at most once.

use std::path::{Path, MAIN_SEPARATOR};

use super::hash::is_short_name;
use super::link::read_link;
use super::shorten::strip_root_ignore_case;
use super::symbols::IllegalSymbolTable;
use crate::error::MapError;

/// Logical path that `physical` (under `root`) was mapped from.
pub fn logical_path(
    physical: &Path,
    root: &Path,
    table: &IllegalSymbolTable,
) -> Result<String, MapError> {
    let physical_str = physical.to_string_lossy();
    let root_str = root.to_string_lossy();
    let is_sep = |c: char| c == '/' || c == MAIN_SEPARATOR;
    // The match must end on a component boundary: `/srv/database` is not under `/srv/data`.
    let rest = strip_root_ignore_case(&physical_str, &root_str)
        .filter(|rest| rest.is_empty() || rest.starts_with(is_sep) || root_str.ends_with(is_sep))
        .ok_or_else(|| {
            MapError::contract(format!(
                "path {} is not under the root {}",
                physical.display(),
                root.display()
            ))
        })?;

    let mut parts = rest
        .split(is_sep)
        .filter(|s| !s.is_empty())
        .peekable();

    let mut segments: Vec<String> = Vec::new();
    if let Some(first) = parts.peek().copied() {
        if is_short_name(first) {
            if let Some(prefix) = read_link(&root.join(first))? {
                segments.push(prefix);
                parts.next();
            }
        }
    }
    for part in parts {
        if part == "." || part == ".." {
            return Err(MapError::contract(format!(
                "relative component in mapped path {}",
                physical.display()
            )));
        }
        segments.push(part.to_string());
    }

    Ok(table.unescape(&segments.join("/")))
}
