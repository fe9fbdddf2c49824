//! End-to-end eject flow: resolve the target volume, scan and classify its
//! blockers, report them, optionally close the user-owned ones, unmount.

use crate::blockers::{classify_blockers, scan_open_files, summarize, ScanSummary};
use crate::eject::eject_volume;
use crate::report::print_report;
use crate::terminate::terminate_user_blockers;
use crate::volumes::{list_volumes, volume_path, MOUNT_ROOT};
use std::io::{self, Write};
use std::path::Path;
use std::thread;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Pause between closing the last blocker and running diskutil.
const EJECT_SETTLE: Duration = Duration::from_secs(1);

/// Hard failures of one run; each maps to exit code 1.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("volume \"{0}\" is not mounted under /Volumes")]
    VolumeNotFound(String),
    #[error("invalid selection")]
    InvalidSelection,
    #[error("could not unmount \"{0}\"")]
    UnmountFailed(String),
}

/// Runs one full eject. `Ok(())` covers the soft endings too: nothing
/// mounted, or the operator declining the confirmation.
pub fn run(volume_arg: Option<&str>) -> Result<(), RunError> {
    let root = Path::new(MOUNT_ROOT);
    let target = match volume_arg {
        Some(name) => resolve_explicit(root, name)?,
        None => match select_volume(root)? {
            Some(name) => name,
            None => return Ok(()),
        },
    };

    let path = volume_path(&target);
    let records = classify_blockers(&scan_open_files(&path));
    if records.is_empty() {
        println!("✅ Nothing is holding \"{}\" open", target);
        return do_eject(&target, &path);
    }

    let summary = summarize(&records);
    print_report(&target, &records, &summary);

    match needs_confirmation(&summary) {
        None => {
            println!("ℹ️  Only system services remain; they release during unmount");
        }
        Some(default_yes) => {
            if !confirm_close(summary.user_count, default_yes) {
                println!("Aborted; \"{}\" stays mounted", target);
                return Ok(());
            }
            let closed = terminate_user_blockers(&records);
            info!("{} of {} user process(es) closed", closed, summary.user_count);
            thread::sleep(EJECT_SETTLE);
        }
    }

    do_eject(&target, &path)
}

/// `None` when no user blockers exist (eject proceeds without asking);
/// otherwise the default answer for the prompt, "no" when a write handle
/// is at risk.
pub fn needs_confirmation(summary: &ScanSummary) -> Option<bool> {
    if summary.user_count == 0 {
        None
    } else {
        Some(!summary.has_writers)
    }
}

/// Interprets a confirmation answer; the empty answer takes the default.
pub fn parse_confirmation(input: &str, default_yes: bool) -> bool {
    match input.trim().to_ascii_lowercase().as_str() {
        "" => default_yes,
        "y" | "yes" => true,
        _ => false,
    }
}

/// Interprets a 1-based menu answer against `len` entries.
pub fn parse_selection(input: &str, len: usize) -> Option<usize> {
    let choice: usize = input.trim().parse().ok()?;
    if (1..=len).contains(&choice) {
        Some(choice - 1)
    } else {
        None
    }
}

fn do_eject(name: &str, path: &Path) -> Result<(), RunError> {
    eject_volume(path).map_err(|e| {
        debug!("eject failed: {}", e);
        RunError::UnmountFailed(name.to_string())
    })
}

fn resolve_explicit(root: &Path, name: &str) -> Result<String, RunError> {
    let volumes = list_volumes(root);
    if volumes.iter().any(|v| v == name) {
        return Ok(name.to_string());
    }
    eprintln!("❌ Volume \"{}\" not found", name);
    if volumes.is_empty() {
        eprintln!("   No ejectable volumes are currently mounted");
    } else {
        eprintln!("   Available volumes:");
        for volume in &volumes {
            eprintln!("   - {}", volume);
        }
    }
    Err(RunError::VolumeNotFound(name.to_string()))
}

/// Numbered menu over the candidate volumes. `Ok(None)` means nothing is
/// mounted, which ends the run successfully.
fn select_volume(root: &Path) -> Result<Option<String>, RunError> {
    let volumes = list_volumes(root);
    if volumes.is_empty() {
        println!("No ejectable volumes found under {}", MOUNT_ROOT);
        return Ok(None);
    }
    println!("Mounted volumes:");
    for (i, volume) in volumes.iter().enumerate() {
        println!("  {}) {}", i + 1, volume);
    }
    print!("Select a volume to eject [1-{}]: ", volumes.len());
    match parse_selection(&read_input(), volumes.len()) {
        Some(index) => Ok(Some(volumes[index].clone())),
        None => Err(RunError::InvalidSelection),
    }
}

fn confirm_close(user_count: usize, default_yes: bool) -> bool {
    let hint = if default_yes { "[Y/n]" } else { "[y/N]" };
    print!("Close {} user process(es) and eject? {} ", user_count, hint);
    parse_confirmation(&read_input(), default_yes)
}

/// Flushes the pending prompt and reads one answer line; any I/O problem
/// reads as the empty answer.
fn read_input() -> String {
    if io::stdout().flush().is_err() {
        return String::new();
    }
    let mut line = String::new();
    match io::stdin().read_line(&mut line) {
        Ok(_) => line,
        Err(_) => String::new(),
    }
}
