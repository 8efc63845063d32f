//! The canonical per-file index
//!
//! One JSON record per line, one line per tracked file, regenerated in
//! full on every run. Every downstream analyzer reads this artifact
//! through [`read_records`], which skips malformed lines so a single
//! bad record never takes an analyzer down.

use crate::error::IndexError;
use crate::git::TrackedFile;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Canonical record for one tracked file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Repository-relative path, forward-slash separated
    pub path: String,
    /// Stored blob size in bytes, 0 when metadata lookup failed
    pub size_bytes: u64,
    /// Substring after the last `.` of the final component, or `"none"`
    pub extension: String,
    /// Number of `/` separators (0 for a top-level file)
    pub depth: usize,
    /// Blob id, absent when metadata lookup failed
    pub blob_sha: Option<String>,
}

impl FileRecord {
    /// Build a record from a listed tracked file
    pub fn from_tracked(file: TrackedFile) -> Self {
        let extension = extension_of(&file.path);
        let depth = depth_of(&file.path);
        Self {
            path: file.path,
            size_bytes: file.size_bytes,
            extension,
            depth,
            blob_sha: file.blob_sha,
        }
    }
}

/// Extension of the final path component, `"none"` when it has no dot
pub fn extension_of(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(i) => name[i + 1..].to_string(),
        None => "none".to_string(),
    }
}

/// Number of `/` separators in a repository-relative path
pub fn depth_of(path: &str) -> usize {
    path.matches('/').count()
}

/// Counts from one index build, for logging and test assertions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSummary {
    /// Records written to the index
    pub written: usize,
    /// Records whose metadata lookup failed (size 0, no blob id)
    pub degraded: usize,
}

/// Write the full record stream for `files` to `out`, one JSON object
/// per line in enumeration order.
///
/// Fully overwrites any prior index at that location; there is no
/// incremental mode. Parent directories are created as needed.
pub fn build_index(files: Vec<TrackedFile>, out: &Path) -> Result<IndexSummary, IndexError> {
    let write_failed = |e: std::io::Error| IndexError::WriteFailed {
        path: out.display().to_string(),
        reason: e.to_string(),
    };

    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(write_failed)?;
    }

    let mut writer = BufWriter::new(File::create(out).map_err(write_failed)?);
    let mut summary = IndexSummary {
        written: 0,
        degraded: 0,
    };

    for file in files {
        if file.degraded.is_some() {
            summary.degraded += 1;
        }
        let record = FileRecord::from_tracked(file);
        let line = serde_json::to_string(&record).map_err(|e| IndexError::WriteFailed {
            path: out.display().to_string(),
            reason: e.to_string(),
        })?;
        writer.write_all(line.as_bytes()).map_err(write_failed)?;
        writer.write_all(b"\n").map_err(write_failed)?;
        summary.written += 1;
    }
    writer.flush().map_err(write_failed)?;

    tracing::info!(
        "Wrote {} records to {} ({} degraded)",
        summary.written,
        out.display(),
        summary.degraded
    );

    Ok(summary)
}

/// Read every parseable record from an index file.
///
/// Blank and malformed lines are skipped. A missing or unopenable file
/// is the only error: it aborts the calling analyzer, which reports the
/// diagnostic and produces no artifact.
pub fn read_records(path: &Path) -> Result<Vec<FileRecord>, IndexError> {
    if !path.exists() {
        return Err(IndexError::NotFound(path.display().to_string()));
    }

    let file = File::open(path).map_err(|e| IndexError::OpenFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => {
                skipped += 1;
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<FileRecord>(&line) {
            Ok(record) => records.push(record),
            Err(_) => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} malformed index lines", skipped);
    }

    Ok(records)
}
