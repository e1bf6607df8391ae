//! Collapse an over-long path under a root into `root/<8 hex>`.

use std::path::{Path, PathBuf};

use super::hash::reduce;
use crate::error::MapError;

/// Strip `root` from the front of `path`, comparing char by char without case.
pub(crate) fn strip_root_ignore_case<'a>(path: &'a str, root: &str) -> Option<&'a str> {
    let mut chars = path.char_indices();
    let mut end = 0;
    for r in root.chars() {
        let (i, c) = chars.next()?;
        if c != r && !c.to_lowercase().eq(r.to_lowercase()) {
            return None;
        }
        end = i + c.len_utf8();
    }
    Some(&path[end..])
}

/// Map `path`, which must start with `root`, to `root` joined with the
/// reduced hash of the remainder.
///
/// Remainders equal up to case resolve to the same directory.
pub fn shorten(path: &Path, root: &Path) -> Result<PathBuf, MapError> {
    let path_str = path.to_string_lossy();
    let root_str = root.to_string_lossy();
    let rest = strip_root_ignore_case(&path_str, &root_str).ok_or_else(|| {
        MapError::contract(format!(
            "path {} is not under the root {}",
            path.display(),
            root.display()
        ))
    })?;
    Ok(root.join(reduce(rest)))
}
