//! Integration tests for volume enumeration.
//!
//! The enumerator takes the mount root as a parameter, so these tests point
//! it at temporary directories instead of /Volumes.

use safe_eject::volumes::{list_volumes, RESERVED_VOLUMES};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_reserved_names_are_excluded() {
    let root = tempdir().unwrap();
    fs::create_dir(root.path().join("USB Drive")).unwrap();
    fs::create_dir(root.path().join("Macintosh HD")).unwrap();
    fs::create_dir(root.path().join("Preboot")).unwrap();

    let volumes = list_volumes(root.path());
    assert_eq!(volumes, vec!["USB Drive".to_string()]);
}

#[test]
fn test_every_reserved_name_is_filtered() {
    let root = tempdir().unwrap();
    for name in RESERVED_VOLUMES {
        fs::create_dir(root.path().join(name)).unwrap();
    }
    assert!(list_volumes(root.path()).is_empty());
}

#[test]
fn test_plain_files_are_not_volumes() {
    let root = tempdir().unwrap();
    fs::write(root.path().join(".DS_Store"), b"junk").unwrap();
    fs::create_dir(root.path().join("Backup")).unwrap();

    let volumes = list_volumes(root.path());
    assert_eq!(volumes, vec!["Backup".to_string()]);
}

#[test]
fn test_missing_root_yields_empty_list() {
    let root = tempdir().unwrap();
    let gone = root.path().join("not-there");
    assert!(list_volumes(&gone).is_empty());
}

#[test]
fn test_empty_root_yields_empty_list() {
    let root = tempdir().unwrap();
    assert!(list_volumes(root.path()).is_empty());
}
