//! Volume discovery under the macOS mount root.
//!
//! Every mounted volume appears as a directory directly under /Volumes.
//! The boot disk and its helper partitions show up there too and must
//! never be offered for ejection.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fixed location under which macOS mounts removable volumes.
pub const MOUNT_ROOT: &str = "/Volumes";

/// Volume names reserved for the boot disk and its helper partitions.
pub const RESERVED_VOLUMES: &[&str] = &[
    "Macintosh HD",
    "Macintosh HD - Data",
    "Recovery",
    "Preboot",
    "VM",
    "Update",
];

/// Lists candidate volumes under `root` in filesystem listing order.
///
/// Only directories count, reserved names are excluded, and an unreadable
/// or missing root yields an empty list rather than an error.
pub fn list_volumes(root: &Path) -> Vec<String> {
    let entries = match fs::read_dir(root) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("cannot read {}: {}", root.display(), e);
            return Vec::new();
        }
    };

    let mut out = Vec::new();
    for entry in entries.flatten() {
        if !entry.path().is_dir() {
            continue;
        }
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(_) => continue,
        };
        if RESERVED_VOLUMES.contains(&name.as_str()) {
            continue;
        }
        out.push(name);
    }
    out
}

/// Full mount path for a volume name.
pub fn volume_path(name: &str) -> PathBuf {
    Path::new(MOUNT_ROOT).join(name)
}
