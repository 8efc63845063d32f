/// Configuration for the audit pipeline
///
/// Every fixed inventory the pipeline depends on lives here as an
/// explicit, injectable object: artifact locations, report caps, the
/// risk keyword list, the manifest allowlist, and the two bundle
/// inventories. The CLI constructs the defaults; tests inject their own.
use crate::bundle::{BundleSpec, FlattenRule};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuditConfig {
    /// Report artifact locations
    pub artifacts: ArtifactConfig,

    /// Report caps and depth bounds
    pub limits: LimitConfig,

    /// Scan inventories (keywords, allowlists, exclusions)
    pub scan: ScanConfig,

    /// Bundle inventories
    pub bundles: BundleConfig,
}

/// Output locations for every report artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Canonical NDJSON index produced by the index builder
    #[serde(default = "default_index_path")]
    pub index_path: PathBuf,

    /// Disk-usage ranking
    #[serde(default = "default_du_path")]
    pub du_path: PathBuf,

    /// Extension frequency / sampled line-count profile
    #[serde(default = "default_filetype_path")]
    pub filetype_path: PathBuf,

    /// Directory structure rollup
    #[serde(default = "default_structure_path")]
    pub structure_path: PathBuf,

    /// Newline-delimited manifest paths
    #[serde(default = "default_manifests_path")]
    pub manifests_path: PathBuf,

    /// Newline-delimited CI workflow paths
    #[serde(default = "default_workflows_path")]
    pub workflows_path: PathBuf,

    /// Newline-delimited sensitive paths
    #[serde(default = "default_risk_path")]
    pub risk_path: PathBuf,

    /// Audit report archive
    #[serde(default = "default_audit_bundle_path")]
    pub audit_bundle_path: PathBuf,

    /// Business document archive
    #[serde(default = "default_business_bundle_path")]
    pub business_bundle_path: PathBuf,
}

/// Report caps and depth bounds
///
/// These are explicit, documented truncations (bounded loss by design),
/// not tunables to be adjusted casually: downstream consumers rely on
/// the exact counts and ordering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    /// Directories reported by the size walker
    #[serde(default = "default_top_dirs")]
    pub top_dirs: usize,

    /// Directory levels below the root the size walker visits
    #[serde(default = "default_walk_depth")]
    pub walk_depth: usize,

    /// Extensions reported by the filetype profiler
    #[serde(default = "default_top_extensions")]
    pub top_extensions: usize,

    /// Extensions that get line-count sampling
    #[serde(default = "default_loc_extensions")]
    pub loc_extensions: usize,

    /// Files sampled per extension for line counts
    #[serde(default = "default_loc_samples")]
    pub loc_samples: usize,

    /// Prefixes reported by the structure aggregator
    #[serde(default = "default_top_prefixes")]
    pub top_prefixes: usize,

    /// Maximum prefix depth the structure aggregator rolls up to
    #[serde(default = "default_prefix_depth")]
    pub prefix_depth: usize,

    /// Safety cap on reported risk matches
    #[serde(default = "default_max_risk_matches")]
    pub max_risk_matches: usize,
}

/// Scan inventories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Directory names excluded from every live-tree walk
    #[serde(default = "default_excluded_dirs")]
    pub excluded_dirs: Vec<String>,

    /// Exact base names recognized as dependency manifests
    #[serde(default = "default_manifest_names")]
    pub manifest_names: Vec<String>,

    /// Lowercase substrings that flag a path as sensitive
    #[serde(default = "default_risk_keywords")]
    pub risk_keywords: Vec<String>,
}

/// The two bundle inventories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    /// Report artifacts packaged by the audit bundle
    #[serde(default = "default_audit_bundle")]
    pub audit: BundleSpec,

    /// Business documents packaged separately
    #[serde(default = "default_business_bundle")]
    pub business: BundleSpec,
}

// Default value functions
fn default_index_path() -> PathBuf {
    PathBuf::from("audit/repo_index.ndjson")
}

fn default_du_path() -> PathBuf {
    PathBuf::from("audit/du_top.json")
}

fn default_filetype_path() -> PathBuf {
    PathBuf::from("audit/filetype_profile.json")
}

fn default_structure_path() -> PathBuf {
    PathBuf::from("audit/structure.json")
}

fn default_manifests_path() -> PathBuf {
    PathBuf::from("audit/manifests.txt")
}

fn default_workflows_path() -> PathBuf {
    PathBuf::from("audit/cicd_workflows.txt")
}

fn default_risk_path() -> PathBuf {
    PathBuf::from("audit/surface_risk_paths_limited.txt")
}

fn default_audit_bundle_path() -> PathBuf {
    PathBuf::from("audit_bundle.tar.gz")
}

fn default_business_bundle_path() -> PathBuf {
    PathBuf::from("business_docs.tar.gz")
}

fn default_top_dirs() -> usize {
    200
}

fn default_walk_depth() -> usize {
    3
}

fn default_top_extensions() -> usize {
    50
}

fn default_loc_extensions() -> usize {
    10
}

fn default_loc_samples() -> usize {
    10
}

fn default_top_prefixes() -> usize {
    500
}

fn default_prefix_depth() -> usize {
    6
}

fn default_max_risk_matches() -> usize {
    5000
}

fn default_excluded_dirs() -> Vec<String> {
    vec![".git".to_string(), "node_modules".to_string()]
}

fn default_manifest_names() -> Vec<String> {
    [
        "package.json",
        "yarn.lock",
        "pnpm-lock.yaml",
        "package-lock.json",
        "requirements.txt",
        "Pipfile",
        "Pipfile.lock",
        "go.mod",
        "Gemfile",
        "composer.json",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_risk_keywords() -> Vec<String> {
    [
        "auth",
        "login",
        "password",
        "secret",
        "api_key",
        "apikey",
        "api-key",
        "token",
        "jwt",
        "env",
        ".env",
        "credentials",
        "db_pass",
        "conn_string",
        "stripe",
        "firebase",
        "webhook",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_audit_bundle() -> BundleSpec {
    BundleSpec {
        files: [
            "audit/repo_index.ndjson",
            "audit/structure.json",
            "audit/filetype_profile.json",
            "audit/du_top.json",
            "audit/surface_risk_paths_limited.txt",
            "audit/manifests.txt",
            "audit/cicd_workflows.txt",
            "runner_config.json",
        ]
        .into_iter()
        .map(PathBuf::from)
        .collect(),
        // Reports keep their relative paths; only the runner config is
        // flattened to its base name.
        flatten: FlattenRule::Names(vec!["runner_config.json".to_string()]),
    }
}

fn default_business_bundle() -> BundleSpec {
    BundleSpec {
        files: [
            "GETTUPP_MASTER_UNIFIED_Q4_2025_FULL.json",
            "GETTUPP_MASTER_UNIFIED_Q4_2025_FULL_with_GettUpp_Girls.json",
            "FULL_SYSTEM_AUDIT.md",
            "GAP_ANALYSIS.md",
            "GO_NO_GO.md",
            "LAUNCH_STATUS.md",
            "PROJECT_RULES.md",
            "PROJECT_STATUS_REPORT.md",
            "ROADMAP.md",
            "UX_AUDIT_REPORT.md",
            "AUDIT_REPORT.md",
            "CMS_IMPROVEMENTS.md",
        ]
        .into_iter()
        .map(PathBuf::from)
        .collect(),
        flatten: FlattenRule::All,
    }
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            index_path: default_index_path(),
            du_path: default_du_path(),
            filetype_path: default_filetype_path(),
            structure_path: default_structure_path(),
            manifests_path: default_manifests_path(),
            workflows_path: default_workflows_path(),
            risk_path: default_risk_path(),
            audit_bundle_path: default_audit_bundle_path(),
            business_bundle_path: default_business_bundle_path(),
        }
    }
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            top_dirs: default_top_dirs(),
            walk_depth: default_walk_depth(),
            top_extensions: default_top_extensions(),
            loc_extensions: default_loc_extensions(),
            loc_samples: default_loc_samples(),
            top_prefixes: default_top_prefixes(),
            prefix_depth: default_prefix_depth(),
            max_risk_matches: default_max_risk_matches(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            excluded_dirs: default_excluded_dirs(),
            manifest_names: default_manifest_names(),
            risk_keywords: default_risk_keywords(),
        }
    }
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            audit: default_audit_bundle(),
            business: default_business_bundle(),
        }
    }
}
