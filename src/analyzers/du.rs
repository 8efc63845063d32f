//! Filesystem size walker
//!
//! Walks the live working tree (not the index), so untracked and ignored
//! files count toward directory totals. Each visited directory gets its
//! own recursive byte total; sizes of nested directories therefore also
//! appear inside their ancestors' totals, which is what a usage ranking
//! wants.

use crate::config::{LimitConfig, ScanConfig};
use crate::walk::{is_excluded, to_unix_relative};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// One ranked directory: human-scaled size string plus relative path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeEntry {
    /// Binary-megabyte string, e.g. "12.40MB"
    pub size: String,
    pub path: String,
}

/// Recursive byte total of a directory.
///
/// Sums everything beneath the directory, excluded names included: the
/// exclusion list only decides which directories get ranked, and a
/// ranked directory's total must reflect what it actually holds on
/// disk. Per-entry errors contribute zero.
fn dir_size(path: &Path) -> u64 {
    let mut total = 0u64;
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(_) => return 0,
    };
    for entry in entries.flatten() {
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(_) => continue,
        };
        if file_type.is_file() {
            if let Ok(metadata) = entry.metadata() {
                total += metadata.len();
            }
        } else if file_type.is_dir() {
            total += dir_size(&entry.path());
        }
        // Symlinks contribute nothing
    }
    total
}

/// Rank directories up to `walk_depth` levels below the root by their
/// recursive size, descending, keeping the top `top_dirs`.
///
/// The root itself is excluded from the ranking: it is always the
/// largest entry and carries no information. Ties keep walk order.
pub fn rank_directories(root: &Path, scan: &ScanConfig, limits: &LimitConfig) -> Vec<SizeEntry> {
    let mut sizes: Vec<(u64, String)> = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .min_depth(1)
        .max_depth(limits.walk_depth)
        .into_iter()
        .filter_entry(|entry| !is_excluded(entry.file_name(), &scan.excluded_dirs));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(path) = to_unix_relative(root, entry.path()) else {
            continue;
        };
        sizes.push((dir_size(entry.path()), path));
    }

    // Stable sort: equal sizes keep walk order
    sizes.sort_by(|a, b| b.0.cmp(&a.0));
    sizes.truncate(limits.top_dirs);

    sizes
        .into_iter()
        .map(|(size, path)| SizeEntry {
            size: format!("{:.2}MB", size as f64 / 1024.0 / 1024.0),
            path,
        })
        .collect()
}

/// Run the size walker and write the ranking artifact.
pub fn scan_du(
    root: &Path,
    out: &Path,
    scan: &ScanConfig,
    limits: &LimitConfig,
) -> Result<Vec<SizeEntry>> {
    let entries = rank_directories(root, scan, limits);
    super::write_json_pretty(out, &entries)?;
    tracing::info!("Wrote {} ({} directories)", out.display(), entries.len());
    Ok(entries)
}
