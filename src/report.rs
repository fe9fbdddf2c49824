//! Human-facing report of the processes blocking a volume.

use crate::blockers::{BlockerRecord, ScanSummary};

/// Formats the blocker report: one line per process, a counts line, and a
/// data-loss warning when any blocker holds a write handle.
pub fn render_report(volume: &str, records: &[BlockerRecord], summary: &ScanSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "🔍 {} process(es) holding files open on \"{}\":\n",
        records.len(),
        volume
    ));
    for record in records {
        out.push_str(&format!(
            "   {} (pid {}, {}, {})\n",
            record.name, record.pid, record.access, record.origin
        ));
    }
    out.push_str(&format!(
        "   {} user / {} system\n",
        summary.user_count, summary.system_count
    ));
    if summary.has_writers {
        out.push_str(
            "⚠️  At least one process has a write handle open; closing it may lose unsaved data\n",
        );
    }
    out
}

/// Writes the report to the user-facing stream.
pub fn print_report(volume: &str, records: &[BlockerRecord], summary: &ScanSummary) {
    print!("{}", render_report(volume, records, summary));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockers::{AccessMode, Origin};

    fn record(name: &str, pid: u32, access: AccessMode, origin: Origin) -> BlockerRecord {
        BlockerRecord {
            name: name.to_string(),
            pid,
            access,
            origin,
        }
    }

    #[test]
    fn test_render_one_line_per_record_plus_counts() {
        let records = vec![
            record("Preview", 841, AccessMode::Read, Origin::User),
            record("mds_stores", 112, AccessMode::Read, Origin::System),
        ];
        let summary = crate::blockers::summarize(&records);
        let report = render_report("USB", &records, &summary);
        assert!(report.contains("Preview (pid 841, read-only, user)"));
        assert!(report.contains("mds_stores (pid 112, read-only, system)"));
        assert!(report.contains("1 user / 1 system"));
    }

    #[test]
    fn test_write_hazard_warning_only_for_writers() {
        let readers = vec![record("Preview", 841, AccessMode::Read, Origin::User)];
        let summary = crate::blockers::summarize(&readers);
        assert!(!render_report("USB", &readers, &summary).contains("write handle"));

        let writers = vec![record("vim", 2210, AccessMode::Write, Origin::User)];
        let summary = crate::blockers::summarize(&writers);
        assert!(render_report("USB", &writers, &summary).contains("write handle"));
    }
}
