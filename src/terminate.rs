//! Graceful-then-forced termination of user-owned blockers.
//!
//! Each user process gets SIGTERM, up to five one-second liveness polls,
//! then SIGKILL with a one-second settle before the final check. System
//! services are skipped; they release their handles during unmount.

use crate::blockers::{BlockerRecord, Origin};
use nix::errno::Errno;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::thread;
use std::time::Duration;
use tracing::debug;

const GRACEFUL_POLLS: u32 = 5;
const POLL_INTERVAL: Duration = Duration::from_secs(1);
const FORCED_SETTLE: Duration = Duration::from_secs(1);

/// Terminal state of one close attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Exited within the SIGTERM polling window.
    Graceful,
    /// Exited only after SIGKILL.
    Forced,
    /// Could not be signalled, or survived SIGKILL.
    Failed,
}

/// Process-table access, split out so the wait/escalate sequence can be
/// exercised without touching real processes.
trait ProcessTable {
    fn signal(&mut self, pid: u32, signal: Signal) -> nix::Result<()>;
    fn is_alive(&mut self, pid: u32) -> bool;
    fn wait(&mut self, duration: Duration);
}

/// The real process table.
struct OsProcessTable;

impl ProcessTable for OsProcessTable {
    fn signal(&mut self, pid: u32, signal: Signal) -> nix::Result<()> {
        kill(Pid::from_raw(pid as i32), signal)
    }

    fn is_alive(&mut self, pid: u32) -> bool {
        // Null-signal probe; EPERM still means the process exists.
        !matches!(kill(Pid::from_raw(pid as i32), None), Err(Errno::ESRCH))
    }

    fn wait(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Asks every user-origin blocker to exit and reports what happened to each
/// one. Returns how many actually went away; the caller treats the count as
/// informational and ejects regardless.
pub fn terminate_user_blockers(records: &[BlockerRecord]) -> usize {
    run_terminations(&mut OsProcessTable, records)
}

fn run_terminations<T: ProcessTable>(table: &mut T, records: &[BlockerRecord]) -> usize {
    let mut closed = 0;
    for record in records {
        if record.origin == Origin::System {
            debug!("leaving system process {} (pid {}) alone", record.name, record.pid);
            continue;
        }
        match close_process(table, record.pid) {
            CloseOutcome::Graceful => {
                println!("   ✅ {} (pid {}) closed gracefully", record.name, record.pid);
                closed += 1;
            }
            CloseOutcome::Forced => {
                println!(
                    "   ✅ {} (pid {}) closed after forced termination",
                    record.name, record.pid
                );
                closed += 1;
            }
            CloseOutcome::Failed => {
                println!(
                    "   ⚠️  {} (pid {}) could not be closed",
                    record.name, record.pid
                );
            }
        }
    }
    closed
}

/// One process through the close sequence: SIGTERM, bounded polling,
/// SIGKILL, settle, final check.
fn close_process<T: ProcessTable>(table: &mut T, pid: u32) -> CloseOutcome {
    if let Err(e) = table.signal(pid, Signal::SIGTERM) {
        println!("   ⚠️  could not signal pid {}: {}", pid, e);
        return CloseOutcome::Failed;
    }
    for _ in 0..GRACEFUL_POLLS {
        table.wait(POLL_INTERVAL);
        if !table.is_alive(pid) {
            return CloseOutcome::Graceful;
        }
    }
    if let Err(e) = table.signal(pid, Signal::SIGKILL) {
        println!("   ⚠️  could not force-terminate pid {}: {}", pid, e);
        return CloseOutcome::Failed;
    }
    table.wait(FORCED_SETTLE);
    if table.is_alive(pid) {
        CloseOutcome::Failed
    } else {
        CloseOutcome::Forced
    }
}
