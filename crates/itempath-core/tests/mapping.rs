//! End-to-end mapping against a scratch root: overflow, link files,
//! idempotence, reverse mapping and concurrent callers.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use itempath_core::config::MapperConfig;
use itempath_core::path_map::{is_short_name, read_link, reduce, PathMapper, LINK_FILE_NAME};
use itempath_core::MapError;
use tempfile::tempdir;

fn mapper(max_folder_name_length: usize) -> PathMapper {
    PathMapper::new(&MapperConfig {
        max_folder_name_length,
        ..MapperConfig::default()
    })
    .unwrap()
}

/// The single short directory created directly under `root`.
fn only_short_dir(root: &Path) -> std::path::PathBuf {
    let dirs: Vec<_> = fs::read_dir(root)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.join(LINK_FILE_NAME).is_file())
        .collect();
    assert_eq!(dirs.len(), 1, "expected one short directory, got {dirs:?}");
    dirs.into_iter().next().unwrap()
}

#[test]
fn overflow_creates_short_dir_with_link() {
    let root = tempdir().unwrap();
    let m = mapper(230);

    let out = m.map_path("aaaaaaaaaa/bbbbbbbbbbbb", root.path()).unwrap();

    let short = only_short_dir(root.path());
    let name = short.file_name().unwrap().to_str().unwrap();
    assert!(is_short_name(name));
    assert_eq!(out, short.join("bbbbbbbbbbbb"));
    assert_eq!(read_link(&short).unwrap().as_deref(), Some("aaaaaaaaaa"));
    assert!(out.starts_with(root.path()));
}

#[test]
fn mapping_is_idempotent_and_link_untouched() {
    let root = tempdir().unwrap();
    let m = mapper(230);
    let logical = "aaaaaaaaaa/bbbbbbbbbbbb";

    let first = m.map_path(logical, root.path()).unwrap();
    let short = only_short_dir(root.path());
    let link = short.join(LINK_FILE_NAME);
    let before = fs::metadata(&link).unwrap().modified().unwrap();

    let second = m.map_path(logical, root.path()).unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&link).unwrap(), "aaaaaaaaaa");
    assert_eq!(fs::metadata(&link).unwrap().modified().unwrap(), before);
    assert_eq!(only_short_dir(root.path()), short);
}

#[test]
fn empty_link_left_by_interrupted_write_is_repaired() {
    let root = tempdir().unwrap();
    let m = mapper(230);
    let short = root.path().join(reduce("aaaaaaaaaa"));
    fs::create_dir_all(&short).unwrap();
    fs::write(short.join(LINK_FILE_NAME), "").unwrap();

    let physical = m.map_path("aaaaaaaaaa/bbbbbbbbbbbb", root.path()).unwrap();

    assert_eq!(physical, short.join("bbbbbbbbbbbb"));
    assert_eq!(read_link(&short).unwrap().as_deref(), Some("aaaaaaaaaa"));
    assert_eq!(
        m.logical_path(&physical, root.path()).unwrap(),
        "aaaaaaaaaa/bbbbbbbbbbbb"
    );
}

#[test]
fn escapes_percent_and_reserved_before_overflow() {
    let root = tempdir().unwrap();
    let m = mapper(90);
    let out = m.map_path("100%/a:b", root.path()).unwrap();
    assert_eq!(out, root.path().join("100%25").join("a%3Ab"));
    assert_eq!(m.escape("100%/a:b"), "100%25/a%3Ab");
}

#[test]
fn escaped_length_drives_overflow() {
    let root = tempdir().unwrap();
    let m = mapper(230);
    // 7 raw chars, but each `:` escapes to three, so the escaped path is 11 chars.
    let out = m.map_path("a:b:/cc", root.path()).unwrap();
    let short = only_short_dir(root.path());
    assert_eq!(read_link(&short).unwrap().as_deref(), Some("a%3Ab%3A"));
    assert_eq!(out, short.join("cc"));
}

#[test]
fn short_paths_create_nothing() {
    let root = tempdir().unwrap();
    let m = mapper(90);
    let out = m.map_path("sitecore/content/home", root.path()).unwrap();
    assert!(out.starts_with(root.path()));
    assert_eq!(fs::read_dir(root.path()).unwrap().count(), 0);
}

#[test]
fn same_prefix_different_case_shares_short_dir() {
    let root = tempdir().unwrap();
    let m = mapper(230);
    let a = m.map_path("aaaaaaaaaa/bbbbbbbbbbbb", root.path()).unwrap();
    let b = m.map_path("AAAAAAAAAA/cccccccccccc", root.path()).unwrap();
    assert_eq!(a.parent(), b.parent());
    assert_eq!(read_link(a.parent().unwrap()).unwrap().as_deref(), Some("aaaaaaaaaa"));
}

#[test]
fn reverse_mapping_recovers_logical_path() {
    let root = tempdir().unwrap();
    let m = mapper(230);
    for logical in [
        "aaaaaaaaaa/bbbbbbbbbbbb",
        "aaaaaaaaaa/bbbbbbbbbb/c",
        "a:b:/cc",
        "short",
        "50%/x",
    ] {
        let physical = m.map_path(logical, root.path()).unwrap();
        assert_eq!(m.logical_path(&physical, root.path()).unwrap(), logical);
    }
}

#[test]
fn rooted_logical_path_rejected() {
    let root = tempdir().unwrap();
    let err = mapper(90).map_path("/abs/path", root.path()).unwrap_err();
    assert!(matches!(err, MapError::ContractViolation { .. }));
}

#[test]
fn parent_segments_cannot_leave_root() {
    let root = tempdir().unwrap();
    let m = mapper(230);
    for logical in [
        "../../etc/passwd",
        // Long enough to overflow, with `..` landing in the suffix.
        "aaaaaaaaaa/bbbbbbbbbb/../../../x",
    ] {
        let err = m.map_path(logical, root.path()).unwrap_err();
        assert!(matches!(err, MapError::ContractViolation { .. }), "{logical}");
    }
    assert_eq!(fs::read_dir(root.path()).unwrap().count(), 0);
}

#[test]
fn invalid_budget_rejected() {
    let err = PathMapper::new(&MapperConfig {
        max_folder_name_length: 240,
        ..MapperConfig::default()
    })
    .unwrap_err();
    assert!(matches!(err, MapError::InvalidConfig { .. }));
}

#[test]
fn link_write_failure_propagates() {
    let root = tempdir().unwrap();
    let m = mapper(230);
    let logical = "aaaaaaaaaa/bbbbbbbbbbbb";
    let expected = m.map_path(logical, tempdir().unwrap().path()).unwrap();
    let short_name = expected
        .parent()
        .and_then(|p| p.file_name())
        .unwrap()
        .to_owned();
    // A regular file where the short directory should go.
    fs::write(root.path().join(&short_name), b"not a dir").unwrap();

    let err = m.map_path(logical, root.path()).unwrap_err();
    assert!(matches!(err, MapError::Filesystem { .. }));
}

#[test]
fn concurrent_callers_agree() {
    let root = Arc::new(tempdir().unwrap());
    let m = Arc::new(mapper(230));
    let logical = "aaaaaaaaaa/bbbbbbbbbb/cccccccccc/dd";

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let root = Arc::clone(&root);
            let m = Arc::clone(&m);
            thread::spawn(move || m.map_path(logical, root.path()).unwrap())
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(results.windows(2).all(|w| w[0] == w[1]));
    let short = only_short_dir(root.path());
    assert_eq!(
        read_link(&short).unwrap().as_deref(),
        Some("aaaaaaaaaa/bbbbbbbbbb/cccccccccc")
    );
}
