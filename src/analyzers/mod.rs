//! Independent report analyzers
//!
//! Each analyzer is a stateless pass over its input (the canonical index
//! or the live tree) producing one standalone report artifact. Analyzers
//! share nothing beyond the read-only index file; a failed analyzer
//! prints a diagnostic and leaves its artifact absent without affecting
//! the others.

/// Disk usage by directory, ranked descending
pub mod du;

/// Extension frequency and sampled line counts
pub mod filetypes;

/// Dependency manifest and CI workflow inventory
pub mod manifests;

/// Sensitive-path surfacing by keyword
pub mod risks;

/// Directory-level file count and byte rollups
pub mod structure;

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Write a newline-delimited text artifact, creating parent directories.
pub(crate) fn write_lines(out: &Path, lines: &[String]) -> Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let mut body = lines.join("\n");
    if !body.is_empty() {
        body.push('\n');
    }
    fs::write(out, body).with_context(|| format!("Failed to write {}", out.display()))?;
    Ok(())
}

/// Write a pretty-printed JSON artifact, creating parent directories.
pub(crate) fn write_json_pretty<T: Serialize>(out: &Path, value: &T) -> Result<()> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let body = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    fs::write(out, body).with_context(|| format!("Failed to write {}", out.display()))?;
    Ok(())
}
