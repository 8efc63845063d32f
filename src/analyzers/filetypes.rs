//! Filetype profiler
//!
//! Counts index records per extension and, for the most frequent
//! extensions, samples files from disk to estimate an average line
//! count. Line counting is over raw bytes so binary and odd-encoding
//! files cannot fail it.

use crate::config::LimitConfig;
use crate::error::AuditError;
use crate::index::{self, FileRecord};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Sampled line-count estimate for one extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocEstimate {
    /// Samples successfully read from disk
    pub sample_files: u64,
    /// Integer mean line count over those samples, 0 when none succeeded
    pub avg_loc: u64,
}

/// The filetype report artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiletypeProfile {
    /// Top extensions by frequency, in stable count order
    pub counts: Vec<(String, u64)>,
    /// Line-count estimates for the most frequent extensions
    pub loc_estimates: BTreeMap<String, LocEstimate>,
}

/// Count newline-delimited chunks in raw bytes.
///
/// A trailing chunk without a final newline still counts; an empty file
/// has zero lines.
pub fn count_lines(bytes: &[u8]) -> u64 {
    if bytes.is_empty() {
        return 0;
    }
    let newlines = bytes.iter().filter(|&&b| b == b'\n').count() as u64;
    if bytes.last() == Some(&b'\n') {
        newlines
    } else {
        newlines + 1
    }
}

struct ExtBucket {
    extension: String,
    count: u64,
    samples: Vec<String>,
}

/// Profile a record stream, sampling files relative to `root`.
pub fn profile_records(records: &[FileRecord], root: &Path, limits: &LimitConfig) -> FiletypeProfile {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<ExtBucket> = Vec::new();

    for record in records {
        let slot = *slots.entry(record.extension.clone()).or_insert_with(|| {
            buckets.push(ExtBucket {
                extension: record.extension.clone(),
                count: 0,
                samples: Vec::new(),
            });
            buckets.len() - 1
        });
        buckets[slot].count += 1;
        if buckets[slot].samples.len() < limits.loc_samples {
            buckets[slot].samples.push(record.path.clone());
        }
    }

    // Stable sort by count descending: ties keep first-encounter order
    let mut order: Vec<usize> = (0..buckets.len()).collect();
    order.sort_by(|&a, &b| buckets[b].count.cmp(&buckets[a].count));
    order.truncate(limits.top_extensions);

    let counts: Vec<(String, u64)> = order
        .iter()
        .map(|&i| (buckets[i].extension.clone(), buckets[i].count))
        .collect();

    let mut loc_estimates = BTreeMap::new();
    for &i in order.iter().take(limits.loc_extensions) {
        let bucket = &buckets[i];
        let mut total = 0u64;
        let mut read = 0u64;
        for sample in &bucket.samples {
            // Files may have changed or vanished since the index was built
            match fs::read(root.join(sample)) {
                Ok(bytes) => {
                    total += count_lines(&bytes);
                    read += 1;
                }
                Err(_) => continue,
            }
        }
        loc_estimates.insert(
            bucket.extension.clone(),
            LocEstimate {
                sample_files: read,
                avg_loc: if read > 0 { total / read } else { 0 },
            },
        );
    }

    FiletypeProfile {
        counts,
        loc_estimates,
    }
}

/// Run the profiler over an index file and write the report artifact.
pub fn analyze_filetypes(
    root: &Path,
    index_path: &Path,
    out: &Path,
    limits: &LimitConfig,
) -> Result<FiletypeProfile, AuditError> {
    let records = index::read_records(index_path)?;
    let profile = profile_records(&records, root, limits);
    super::write_json_pretty(out, &profile)?;
    tracing::info!(
        "Wrote {} ({} extensions)",
        out.display(),
        profile.counts.len()
    );
    Ok(profile)
}
