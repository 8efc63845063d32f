//! Bundle packaging
//!
//! Packages previously produced artifacts into a gzip-compressed tar
//! archive. Pure packaging: contents are never transformed, and a
//! missing expected file is a warning, never an abort.

use crate::error::BundleError;
use flate2::{Compression, write::GzEncoder};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use tar::Builder;

/// How archive member names are derived from input paths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlattenRule {
    /// Every member collapses to its base name
    All,
    /// Only files with these base names collapse; the rest keep their
    /// full relative path
    Names(Vec<String>),
}

impl FlattenRule {
    fn applies_to(&self, name: &str) -> bool {
        match self {
            FlattenRule::All => true,
            FlattenRule::Names(names) => names.iter().any(|n| n == name),
        }
    }
}

/// An injected bundle inventory: which files to expect and how to name
/// their archive members
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleSpec {
    pub files: Vec<PathBuf>,
    pub flatten: FlattenRule,
}

/// What one bundle run produced, for logging and test assertions
#[derive(Debug, Clone, Default)]
pub struct BundleOutcome {
    /// Member names actually added to the archive
    pub added: Vec<String>,
    /// Expected files that were absent (one warning each)
    pub missing: Vec<PathBuf>,
}

/// Member name for one input path under a flatten rule.
fn member_name(path: &Path, flatten: &FlattenRule) -> String {
    let unix = path.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/");
    let base = unix.rsplit('/').next().unwrap_or(&unix);
    if flatten.applies_to(base) {
        base.to_string()
    } else {
        unix
    }
}

/// Create a gzip tar archive at `out` containing the subset of
/// `spec.files` that exists under `root`.
pub fn create_bundle(
    root: &Path,
    spec: &BundleSpec,
    out: &Path,
) -> Result<BundleOutcome, BundleError> {
    let create_failed = |e: std::io::Error| BundleError::CreateFailed {
        path: out.display().to_string(),
        reason: e.to_string(),
    };

    let file = File::create(out).map_err(create_failed)?;
    let encoder = GzEncoder::new(file, Compression::default());
    let mut archive = Builder::new(encoder);

    let mut outcome = BundleOutcome::default();

    for expected in &spec.files {
        let full = root.join(expected);
        if !full.exists() {
            tracing::warn!("Warning: {} not found", expected.display());
            outcome.missing.push(expected.clone());
            continue;
        }

        let member = member_name(expected, &spec.flatten);
        archive
            .append_path_with_name(&full, &member)
            .map_err(|e| BundleError::AppendFailed {
                member: member.clone(),
                reason: e.to_string(),
            })?;
        tracing::info!("Added {}", expected.display());
        outcome.added.push(member);
    }

    let encoder = archive.into_inner().map_err(|e| BundleError::CreateFailed {
        path: out.display().to_string(),
        reason: e.to_string(),
    })?;
    encoder.finish().map_err(create_failed)?;

    tracing::info!(
        "Created {} ({} members, {} missing)",
        out.display(),
        outcome.added.len(),
        outcome.missing.len()
    );

    Ok(outcome)
}
