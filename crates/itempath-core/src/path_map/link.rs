//! `link` marker files: the on-disk record of what a short directory stands for.
//!
//! The file holds the escaped, slash-delimited prefix, UTF-8, no trailing
//! newline. It is written once, on first overflow of that prefix. The only
//! rewrite is of an empty link file, which carries no record to preserve.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::MapError;

/// Name of the marker file inside a short directory.
pub const LINK_FILE_NAME: &str = "link";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// This call created the link file.
    Created,
    /// A link file for the same prefix was already there.
    Existing,
    /// An empty link file was found and rewritten with the prefix.
    Repaired,
    /// A link file naming a different prefix (ignoring case) was already there.
    Collision,
}

pub fn link_path(short_dir: &Path) -> PathBuf {
    short_dir.join(LINK_FILE_NAME)
}

/// Read the prefix recorded in `short_dir`, if there is a link file.
/// Content is returned verbatim; the writer adds no newline.
pub fn read_link(short_dir: &Path) -> Result<Option<String>, MapError> {
    let path = link_path(short_dir);
    match fs::read_to_string(&path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(MapError::fs(path, e)),
    }
}

/// Make sure `short_dir` exists and carries a link file for `prefix`.
///
/// The content is written to a temp file in `short_dir` and moved into
/// place, so a link file is never observed half written. Safe to race:
/// directory creation tolerates an existing directory and the move refuses
/// to replace an existing link, so the first writer wins.
pub fn ensure_link(short_dir: &Path, prefix: &str) -> Result<LinkOutcome, MapError> {
    let path = link_path(short_dir);
    if path.is_file() {
        return match read_link(short_dir)? {
            Some(existing) if existing.is_empty() => {
                tracing::warn!(path = %path.display(), prefix, "repairing empty link file");
                write_link(short_dir, prefix, true)
            }
            Some(existing) if existing.to_lowercase() != prefix.to_lowercase() => {
                tracing::warn!(
                    dir = %short_dir.display(),
                    existing = %existing,
                    prefix,
                    "short directory already linked to a different prefix"
                );
                Ok(LinkOutcome::Collision)
            }
            _ => Ok(LinkOutcome::Existing),
        };
    }

    fs::create_dir_all(short_dir).map_err(|e| MapError::fs(short_dir, e))?;
    write_link(short_dir, prefix, false)
}

fn write_link(short_dir: &Path, prefix: &str, replace: bool) -> Result<LinkOutcome, MapError> {
    let path = link_path(short_dir);
    let mut tmp = NamedTempFile::new_in(short_dir).map_err(|e| MapError::fs(short_dir, e))?;
    tmp.write_all(prefix.as_bytes())
        .map_err(|e| MapError::fs(&path, e))?;

    if replace {
        tmp.persist(&path).map_err(|e| MapError::fs(&path, e.error))?;
        return Ok(LinkOutcome::Repaired);
    }
    match tmp.persist_noclobber(&path) {
        Ok(_) => {
            tracing::debug!(path = %path.display(), prefix, "created link file");
            Ok(LinkOutcome::Created)
        }
        Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => {
            tracing::debug!(path = %path.display(), "link file created concurrently");
            Ok(LinkOutcome::Existing)
        }
        Err(e) => Err(MapError::fs(path, e.error)),
    }
}
