//! Manifest and CI workflow scanner
//!
//! Walks the live working tree matching base names against a fixed
//! manifest allowlist, and collecting YAML files under a
//! `.github/workflows` path segment. Exact-name matching only.

use crate::config::ScanConfig;
use crate::walk;
use anyhow::Result;
use std::path::Path;

/// The two flat inventories produced by one scan
#[derive(Debug, Clone, Default)]
pub struct ManifestScan {
    /// Paths whose base name is a known dependency manifest
    pub manifests: Vec<String>,
    /// YAML files under `.github/workflows`
    pub workflows: Vec<String>,
}

/// True when a relative path sits under a `.github/workflows` segment
/// and carries a YAML extension.
pub fn is_workflow(path: &str) -> bool {
    path.contains(".github/workflows") && (path.ends_with(".yml") || path.ends_with(".yaml"))
}

/// Scan the tree rooted at `root` for manifests and workflows.
pub fn scan_tree(root: &Path, scan: &ScanConfig) -> ManifestScan {
    let mut result = ManifestScan::default();

    for path in walk::walk_files(root, &scan.excluded_dirs) {
        let name = path.rsplit('/').next().unwrap_or(&path);
        if scan.manifest_names.iter().any(|m| m == name) {
            result.manifests.push(path.clone());
        }
        if is_workflow(&path) {
            result.workflows.push(path);
        }
    }

    result
}

/// Run the scanner and write both newline-delimited artifacts.
pub fn scan_manifests(
    root: &Path,
    manifests_out: &Path,
    workflows_out: &Path,
    scan: &ScanConfig,
) -> Result<ManifestScan> {
    let result = scan_tree(root, scan);

    super::write_lines(manifests_out, &result.manifests)?;
    tracing::info!(
        "Wrote {} ({} manifests)",
        manifests_out.display(),
        result.manifests.len()
    );

    super::write_lines(workflows_out, &result.workflows)?;
    tracing::info!(
        "Wrote {} ({} workflows)",
        workflows_out.display(),
        result.workflows.len()
    );

    Ok(result)
}
