//! Volume unmounting through diskutil, with a forced second tier.

use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::debug;

/// Unmount failure after both tiers were tried.
#[derive(Debug, Error)]
pub enum EjectError {
    #[error("normal and forced unmount both failed for {0}")]
    BothTiersFailed(String),
}

/// Unmounts `path`, escalating to `diskutil unmount force` when the normal
/// unmount is refused. Succeeds if either tier succeeds.
pub fn eject_volume(path: &Path) -> Result<(), EjectError> {
    println!("⏏️  Unmounting {}...", path.display());
    if run_diskutil(path, false) {
        println!("   ✅ Volume unmounted");
        return Ok(());
    }
    println!("   ⚠️  Normal unmount refused, retrying with force...");
    if run_diskutil(path, true) {
        println!("   ✅ Volume unmounted (forced)");
        return Ok(());
    }
    println!("   ❌ Forced unmount failed as well");
    println!("      Close the remaining applications listed above and retry,");
    println!("      or run: diskutil unmountDisk force {}", path.display());
    Err(EjectError::BothTiersFailed(path.display().to_string()))
}

/// One diskutil tier; a spawn failure counts as the tier failing.
fn run_diskutil(path: &Path, force: bool) -> bool {
    let mut cmd = Command::new("diskutil");
    cmd.arg("unmount");
    if force {
        cmd.arg("force");
    }
    cmd.arg(path);
    match cmd.output() {
        Ok(output) => {
            if !output.status.success() {
                debug!(
                    "diskutil unmount{} {} failed: {}",
                    if force { " force" } else { "" },
                    path.display(),
                    String::from_utf8_lossy(&output.stderr).trim()
                );
            }
            output.status.success()
        }
        Err(e) => {
            debug!("could not run diskutil: {}", e);
            false
        }
    }
}
