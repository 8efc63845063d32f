//! Structure aggregator
//!
//! Rolls up file counts and byte totals by path prefix at every depth
//! up to a bound. A file at `a/b/c.txt` counts toward `a` and `a/b`;
//! the full path itself is never a prefix.

use crate::config::LimitConfig;
use crate::error::AuditError;
use crate::index::{self, FileRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Aggregate for one path prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefixStat {
    pub path: String,
    /// Indexed files whose path starts with this prefix plus `/`
    pub file_count: u64,
    /// Byte total of those files
    pub bytes: u64,
}

/// The structure report artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureReport {
    /// Grand total of indexed records
    pub total_files: u64,
    /// Top prefixes by file count, in stable count order
    pub top_paths: Vec<PrefixStat>,
}

/// Aggregate a record stream into a prefix rollup.
pub fn aggregate(records: &[FileRecord], limits: &LimitConfig) -> StructureReport {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut stats: Vec<PrefixStat> = Vec::new();
    let mut total_files = 0u64;

    for record in records {
        total_files += 1;
        let parts: Vec<&str> = record.path.split('/').collect();
        // Prefixes stop short of the file's own segment count
        let max_len = (parts.len() - 1).min(limits.prefix_depth);
        for len in 1..=max_len {
            let prefix = parts[..len].join("/");
            let slot = *slots.entry(prefix.clone()).or_insert_with(|| {
                stats.push(PrefixStat {
                    path: prefix,
                    file_count: 0,
                    bytes: 0,
                });
                stats.len() - 1
            });
            stats[slot].file_count += 1;
            stats[slot].bytes += record.size_bytes;
        }
    }

    // Stable sort by file count descending: ties keep first encounter
    let mut order: Vec<usize> = (0..stats.len()).collect();
    order.sort_by(|&a, &b| stats[b].file_count.cmp(&stats[a].file_count));
    order.truncate(limits.top_prefixes);

    StructureReport {
        total_files,
        top_paths: order.into_iter().map(|i| stats[i].clone()).collect(),
    }
}

/// Run the aggregator over an index file and write the report artifact.
pub fn analyze_structure(
    index_path: &Path,
    out: &Path,
    limits: &LimitConfig,
) -> Result<StructureReport, AuditError> {
    let records = index::read_records(index_path)?;
    let report = aggregate(&records, limits);
    super::write_json_pretty(out, &report)?;
    tracing::info!(
        "Wrote {} ({} files, {} prefixes)",
        out.display(),
        report.total_files,
        report.top_paths.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditConfig;

    fn record(path: &str, size: u64) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            size_bytes: size,
            extension: crate::index::extension_of(path),
            depth: crate::index::depth_of(path),
            blob_sha: None,
        }
    }

    fn stat<'a>(report: &'a StructureReport, path: &str) -> Option<&'a PrefixStat> {
        report.top_paths.iter().find(|s| s.path == path)
    }

    #[test]
    fn test_prefix_fan_out() {
        let records = vec![record("a/b/c.txt", 10)];
        let limits = AuditConfig::default().limits;
        let report = aggregate(&records, &limits);

        assert_eq!(report.total_files, 1);
        assert_eq!(report.top_paths.len(), 2);
        assert_eq!(stat(&report, "a").unwrap().file_count, 1);
        assert_eq!(stat(&report, "a/b").unwrap().bytes, 10);
        assert!(stat(&report, "a/b/c.txt").is_none());
    }

    #[test]
    fn test_top_level_file_contributes_nothing() {
        let records = vec![record("README.md", 5)];
        let limits = AuditConfig::default().limits;
        let report = aggregate(&records, &limits);

        assert_eq!(report.total_files, 1);
        assert!(report.top_paths.is_empty());
    }

    #[test]
    fn test_depth_bound_caps_prefixes() {
        let records = vec![record("a/b/c/d/e/f/g/h.txt", 1)];
        let limits = AuditConfig::default().limits;
        let report = aggregate(&records, &limits);

        // 7 path segments before the file name, capped at 6 prefixes
        assert_eq!(report.top_paths.len(), 6);
        assert!(stat(&report, "a/b/c/d/e/f").is_some());
        assert!(stat(&report, "a/b/c/d/e/f/g").is_none());
    }

    #[test]
    fn test_counts_and_bytes_accumulate() {
        let records = vec![
            record("a/x.go", 10),
            record("a/y.go", 20),
            record("b/z.txt", 5),
        ];
        let limits = AuditConfig::default().limits;
        let report = aggregate(&records, &limits);

        assert_eq!(report.total_files, 3);
        let a = stat(&report, "a").unwrap();
        assert_eq!(a.file_count, 2);
        assert_eq!(a.bytes, 30);
        let b = stat(&report, "b").unwrap();
        assert_eq!(b.file_count, 1);
        assert_eq!(b.bytes, 5);
        // a outranks b
        assert_eq!(report.top_paths[0].path, "a");
    }

    #[test]
    fn test_top_prefix_cap() {
        let mut records = Vec::new();
        for i in 0..600 {
            records.push(record(&format!("d{i}/f.txt"), 1));
        }
        let limits = AuditConfig::default().limits;
        let report = aggregate(&records, &limits);

        assert_eq!(report.top_paths.len(), 500);
        // Ties keep first-encounter order
        assert_eq!(report.top_paths[0].path, "d0");
        assert_eq!(report.top_paths[499].path, "d499");
    }
}
