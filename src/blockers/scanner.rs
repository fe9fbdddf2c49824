//! Open-file scanning over a volume subtree.
//!
//! Wraps `lsof +D <path>`, which prints one line per (process, descriptor)
//! pair holding anything open under the path, after a single column header.

use std::path::Path;
use std::process::Command;
use tracing::{debug, warn};

/// Returns the raw lsof report for `path` with the column header removed.
///
/// An empty string means "no blockers". A missing or non-runnable lsof and
/// a permission denial also produce the empty string: the tool cannot tell
/// those apart from a clean volume and proceeds to eject either way, letting
/// the unmount itself surface any real problem.
pub fn scan_open_files(path: &Path) -> String {
    let output = match Command::new("lsof").arg("+D").arg(path).output() {
        Ok(output) => output,
        Err(e) => {
            warn!(
                "could not run lsof ({}); treating {} as not busy",
                e,
                path.display()
            );
            return String::new();
        }
    };

    // lsof exits non-zero both on errors and when it simply finds nothing,
    // so only stdout decides.
    if output.stdout.is_empty() {
        debug!("lsof reported nothing for {}", path.display());
        return String::new();
    }

    strip_header(&String::from_utf8_lossy(&output.stdout))
}

/// Drops the `COMMAND PID USER FD ...` header line lsof prints first.
fn strip_header(report: &str) -> String {
    report
        .lines()
        .filter(|line| !line.starts_with("COMMAND"))
        .collect::<Vec<_>>()
        .join("\n")
}
