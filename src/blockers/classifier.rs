//! Parsing and classification of raw scanner output into blocker records.
//!
//! Each report line is reduced to (process name, pid, fd-flags token); a
//! process appears once no matter how many descriptors it holds, and is
//! classified by access mode and by whether it is a known system service.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::fmt;

/// Background services that hold handles on every mounted volume and
/// release them during unmount. Reported but never terminated. Matching
/// is exact and case-sensitive.
static SYSTEM_PROCESSES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "mds",
        "mds_stores",
        "mdworker",
        "mdworker_shared",
        "fseventsd",
        "deleted",
        "revisiond",
        "quicklookd",
        "QuickLookUIService",
        "Finder",
    ])
});

/// How a blocker holds the volume: read-only, or with a write handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Read,
    Write,
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessMode::Read => write!(f, "read-only"),
            AccessMode::Write => write!(f, "write"),
        }
    }
}

/// Whether a blocker belongs to the OS or to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    System,
    User,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::System => write!(f, "system"),
            Origin::User => write!(f, "user"),
        }
    }
}

/// One process holding at least one open file under the target volume.
#[derive(Debug, Clone)]
pub struct BlockerRecord {
    pub name: String,
    pub pid: u32,
    pub access: AccessMode,
    pub origin: Origin,
}

/// Aggregate view of one scan, recomputed fresh per run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub user_count: usize,
    pub system_count: usize,
    pub has_writers: bool,
}

/// Parses a header-stripped report into deduplicated blocker records.
///
/// Fields per line, whitespace-delimited: name (1), pid (2), fd flags (4);
/// everything else is ignored. The first line seen for a pid wins, so a
/// later write descriptor of an already-seen process does not upgrade its
/// access mode.
pub fn classify_blockers(report: &str) -> Vec<BlockerRecord> {
    let mut seen = HashSet::new();
    let mut records = Vec::new();
    for line in report.lines() {
        let record = match parse_line(line) {
            Some(record) => record,
            None => continue,
        };
        if seen.insert(record.pid) {
            records.push(record);
        }
    }
    records
}

fn parse_line(line: &str) -> Option<BlockerRecord> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return None;
    }
    let name = fields[0].to_string();
    let pid: u32 = fields[1].parse().ok()?;
    Some(BlockerRecord {
        access: access_mode(fields[3]),
        origin: origin_of(&name),
        name,
        pid,
    })
}

/// WRITE iff the fd flags token carries a write (`w`) or read-write (`u`)
/// marker anywhere in the token.
fn access_mode(flags: &str) -> AccessMode {
    if flags.contains('u') || flags.contains('w') {
        AccessMode::Write
    } else {
        AccessMode::Read
    }
}

fn origin_of(name: &str) -> Origin {
    if SYSTEM_PROCESSES.contains(name) {
        Origin::System
    } else {
        Origin::User
    }
}

/// Derives the per-run aggregate from a record set.
pub fn summarize(records: &[BlockerRecord]) -> ScanSummary {
    let mut summary = ScanSummary::default();
    for record in records {
        match record.origin {
            Origin::System => summary.system_count += 1,
            Origin::User => summary.user_count += 1,
        }
        if record.access == AccessMode::Write {
            summary.has_writers = true;
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Tests for access_mode
    // -------------------------------------------------------------------------

    #[test]
    fn test_access_mode_read_descriptors() {
        assert_eq!(access_mode("1r"), AccessMode::Read);
        assert_eq!(access_mode("txt"), AccessMode::Read);
        assert_eq!(access_mode("3"), AccessMode::Read);
    }

    #[test]
    fn test_access_mode_write_descriptors() {
        assert_eq!(access_mode("1w"), AccessMode::Write);
        assert_eq!(access_mode("3u"), AccessMode::Write);
        assert_eq!(access_mode("12w"), AccessMode::Write);
    }

    // -------------------------------------------------------------------------
    // Tests for origin_of
    // -------------------------------------------------------------------------

    #[test]
    fn test_origin_known_system_services() {
        assert_eq!(origin_of("mds_stores"), Origin::System);
        assert_eq!(origin_of("fseventsd"), Origin::System);
        assert_eq!(origin_of("Finder"), Origin::System);
    }

    #[test]
    fn test_origin_is_exact_full_string_match() {
        assert_eq!(origin_of("Preview"), Origin::User);
        assert_eq!(origin_of("mds_stores2"), Origin::User);
        assert_eq!(origin_of("MDS_STORES"), Origin::User);
        assert_eq!(origin_of("mds "), Origin::User);
    }

    // -------------------------------------------------------------------------
    // Tests for parse_line
    // -------------------------------------------------------------------------

    #[test]
    fn test_parse_line_extracts_name_pid_flags() {
        let record =
            parse_line("vim 2210 alice 7w REG 1,13 512 99 /Volumes/USB/draft.md").unwrap();
        assert_eq!(record.name, "vim");
        assert_eq!(record.pid, 2210);
        assert_eq!(record.access, AccessMode::Write);
        assert_eq!(record.origin, Origin::User);
    }

    #[test]
    fn test_parse_line_skips_short_and_garbled_lines() {
        assert!(parse_line("").is_none());
        assert!(parse_line("vim 2210 alice").is_none());
        assert!(parse_line("vim notapid alice 7w").is_none());
    }
}
