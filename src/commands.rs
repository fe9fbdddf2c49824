//! CLI command implementations.
//!
//! Only one subcommand exists: `list`, a read-only view of the volumes the
//! eject flow would offer.

use crate::volumes::{list_volumes, MOUNT_ROOT};
use std::path::Path;

/// Prints the candidate volumes, one per line.
pub fn command_list() {
    let volumes = list_volumes(Path::new(MOUNT_ROOT));
    if volumes.is_empty() {
        println!("No ejectable volumes found under {}", MOUNT_ROOT);
        return;
    }
    for volume in &volumes {
        println!("{}", volume);
    }
}
