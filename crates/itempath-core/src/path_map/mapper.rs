//! Logical item path to physical directory mapping.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR, MAIN_SEPARATOR_STR};
use std::sync::Arc;

use super::link::ensure_link;
use super::reverse;
use super::shorten::shorten;
use super::symbols::IllegalSymbolTable;
use crate::config::{MapperConfig, PATH_LENGTH_CEILING};
use crate::error::MapError;

/// Maps slash-delimited logical paths to directories under a root, escaping
/// illegal characters and collapsing over-long prefixes into short
/// directories with a `link` file.
///
/// Holds only immutable data; share it across threads freely.
#[derive(Debug, Clone)]
pub struct PathMapper {
    table: Arc<IllegalSymbolTable>,
    threshold: usize,
}

impl PathMapper {
    pub fn new(config: &MapperConfig) -> Result<Self, MapError> {
        let threshold = config.threshold()?;
        Ok(Self {
            table: Arc::new(IllegalSymbolTable::from_config(config)),
            threshold,
        })
    }

    /// Build around an existing table, e.g. one shared with other mappers.
    pub fn with_table(
        table: Arc<IllegalSymbolTable>,
        max_folder_name_length: usize,
    ) -> Result<Self, MapError> {
        let threshold = MapperConfig {
            max_folder_name_length,
            ..MapperConfig::default()
        }
        .threshold()?;
        Ok(Self { table, threshold })
    }

    pub fn table(&self) -> &IllegalSymbolTable {
        &self.table
    }

    /// Escaped length at which a logical path gets split.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn max_folder_name_length(&self) -> usize {
        PATH_LENGTH_CEILING - self.threshold
    }

    /// Escape illegal characters, leaving `/` alone.
    pub fn escape(&self, path: &str) -> String {
        self.table.escape(path)
    }

    /// Same as [`map_path`](Self::map_path).
    pub fn directory_path(&self, item_path: &str, root: &Path) -> Result<PathBuf, MapError> {
        self.map_path(item_path, root)
    }

    /// Physical directory for `logical` under `root`.
    ///
    /// Once the escaped path reaches the threshold, it is split at a `/`
    /// near the last threshold multiple; the part before the split is
    /// replaced by a short directory whose `link` file records it. Only one
    /// split is made per call.
    pub fn map_path(&self, logical: &str, root: &Path) -> Result<PathBuf, MapError> {
        if is_rooted(logical) {
            return Err(MapError::contract(format!(
                "logical path is rooted: {logical}"
            )));
        }
        if has_relative_segment(logical) {
            return Err(MapError::contract(format!(
                "relative segment in logical path: {logical}"
            )));
        }

        let escaped = self.table.escape(logical);
        let len = escaped.chars().count();
        let cut = (len / self.threshold) * self.threshold;
        if cut == 0 {
            return Ok(join_native(root, &escaped));
        }

        let cut_byte = escaped
            .char_indices()
            .nth(cut)
            .map_or(escaped.len(), |(i, _)| i);
        let split = escaped[cut_byte..]
            .find('/')
            .map(|i| cut_byte + i)
            .or_else(|| escaped[..cut_byte].rfind('/'));
        let split = match split {
            Some(i) if i > 0 => i,
            _ => {
                tracing::debug!(len, threshold = self.threshold, "no split point in over-long path");
                return Ok(join_native(root, &escaped));
            }
        };

        let prefix = &escaped[..split];
        let suffix = &escaped[split + 1..];

        let mut long = OsString::from(root.as_os_str());
        long.push(to_native(prefix));
        let short = shorten(Path::new(&long), root)?;
        ensure_link(&short, prefix)?;
        tracing::debug!(short = %short.display(), prefix, "mapped over-long prefix");

        Ok(join_native(&short, suffix))
    }

    /// Logical path a physical path under `root` was mapped from.
    pub fn logical_path(&self, physical: &Path, root: &Path) -> Result<String, MapError> {
        reverse::logical_path(physical, root, &self.table)
    }
}

fn is_rooted(path: &str) -> bool {
    path.starts_with('/')
        || path.starts_with(MAIN_SEPARATOR)
        || Path::new(path).has_root()
        || matches!(Path::new(path).components().next(), Some(Component::Prefix(_)))
}

/// `.` or `..` would let the joined path leave the root.
fn has_relative_segment(path: &str) -> bool {
    path.split(|c: char| c == '/' || c == MAIN_SEPARATOR)
        .any(|seg| seg == "." || seg == "..")
}

fn to_native(path: &str) -> String {
    path.replace('/', MAIN_SEPARATOR_STR)
}

fn join_native(base: &Path, rel: &str) -> PathBuf {
    if rel.is_empty() {
        base.to_path_buf()
    } else {
        base.join(to_native(rel))
    }
}
