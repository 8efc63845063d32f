use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use repo_audit::analyzers::{du, filetypes, manifests, risks, structure};
use repo_audit::bundle;
use repo_audit::config::AuditConfig;
use repo_audit::error::AuditError;
use repo_audit::git::GitLister;
use repo_audit::index;

#[derive(Parser)]
#[command(name = "repo-audit", version, about = "Repository audit pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the canonical tracked-file index
    Index {
        /// Output index path
        out: Option<PathBuf>,
    },
    /// Rank directories by recursive disk usage
    Du {
        /// Output report path
        out: Option<PathBuf>,
    },
    /// Profile extension frequencies and sampled line counts
    Filetypes {
        /// Input index path
        index: Option<PathBuf>,
        /// Output report path
        out: Option<PathBuf>,
    },
    /// Roll up file counts and byte totals by path prefix
    Structure {
        /// Input index path
        index: Option<PathBuf>,
        /// Output report path
        out: Option<PathBuf>,
    },
    /// Inventory dependency manifests and CI workflows
    Manifests {
        /// Output path for manifest paths
        manifests_out: Option<PathBuf>,
        /// Output path for workflow paths
        workflows_out: Option<PathBuf>,
    },
    /// Surface paths containing sensitive keywords
    Risks {
        /// Output report path
        out: Option<PathBuf>,
    },
    /// Package the report artifacts into an archive
    Bundle {
        /// Output archive path
        out: Option<PathBuf>,
    },
    /// Package the business documents into an archive
    BusinessBundle {
        /// Output archive path
        out: Option<PathBuf>,
    },
    /// Run the whole pipeline: index, every analyzer, then the bundle
    All,
}

fn build_index(root: &Path, out: &Path) -> Result<(), AuditError> {
    let lister = GitLister::discover(root)?;
    let files = lister.list_tracked()?;
    index::build_index(files, out)?;
    Ok(())
}

/// The tree root every analyzer walks and samples against.
///
/// Index records are repository-root relative, so when a repository is
/// discoverable its root is the only root consistent with them no
/// matter which subdirectory the tool runs from. Outside a repository
/// the invocation directory stands in (only the stages that never need
/// git can succeed there anyway).
fn resolve_root() -> PathBuf {
    match GitLister::discover(".") {
        Ok(lister) => lister.repo_path().to_path_buf(),
        Err(_) => PathBuf::from("."),
    }
}

/// Report a stage failure without failing the process: the diagnostic
/// plus the absent artifact is the user-visible outcome.
fn report<T, E: std::fmt::Display>(stage: &str, result: Result<T, E>) {
    if let Err(e) = result {
        tracing::error!("{} failed: {}", stage, e);
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = AuditConfig::default();
    let root = resolve_root();
    let root = root.as_path();
    let artifacts = &config.artifacts;

    match cli.command {
        Command::Index { out } => {
            let out = out.unwrap_or_else(|| artifacts.index_path.clone());
            report("index", build_index(root, &out));
        }
        Command::Du { out } => {
            let out = out.unwrap_or_else(|| artifacts.du_path.clone());
            report(
                "du",
                du::scan_du(root, &out, &config.scan, &config.limits),
            );
        }
        Command::Filetypes { index, out } => {
            let index = index.unwrap_or_else(|| artifacts.index_path.clone());
            let out = out.unwrap_or_else(|| artifacts.filetype_path.clone());
            report(
                "filetypes",
                filetypes::analyze_filetypes(root, &index, &out, &config.limits),
            );
        }
        Command::Structure { index, out } => {
            let index = index.unwrap_or_else(|| artifacts.index_path.clone());
            let out = out.unwrap_or_else(|| artifacts.structure_path.clone());
            report(
                "structure",
                structure::analyze_structure(&index, &out, &config.limits),
            );
        }
        Command::Manifests {
            manifests_out,
            workflows_out,
        } => {
            let manifests_out = manifests_out.unwrap_or_else(|| artifacts.manifests_path.clone());
            let workflows_out = workflows_out.unwrap_or_else(|| artifacts.workflows_path.clone());
            report(
                "manifests",
                manifests::scan_manifests(root, &manifests_out, &workflows_out, &config.scan),
            );
        }
        Command::Risks { out } => {
            let out = out.unwrap_or_else(|| artifacts.risk_path.clone());
            report(
                "risks",
                risks::scan_risks(root, &out, &config.scan, &config.limits),
            );
        }
        Command::Bundle { out } => {
            let out = out.unwrap_or_else(|| artifacts.audit_bundle_path.clone());
            report(
                "bundle",
                bundle::create_bundle(root, &config.bundles.audit, &out),
            );
        }
        Command::BusinessBundle { out } => {
            let out = out.unwrap_or_else(|| artifacts.business_bundle_path.clone());
            report(
                "business-bundle",
                bundle::create_bundle(root, &config.bundles.business, &out),
            );
        }
        Command::All => {
            // Stages are independent: a failure is reported and the
            // remaining stages still run
            report("index", build_index(root, &artifacts.index_path));
            report(
                "du",
                du::scan_du(root, &artifacts.du_path, &config.scan, &config.limits),
            );
            report(
                "filetypes",
                filetypes::analyze_filetypes(
                    root,
                    &artifacts.index_path,
                    &artifacts.filetype_path,
                    &config.limits,
                ),
            );
            report(
                "structure",
                structure::analyze_structure(
                    &artifacts.index_path,
                    &artifacts.structure_path,
                    &config.limits,
                ),
            );
            report(
                "manifests",
                manifests::scan_manifests(
                    root,
                    &artifacts.manifests_path,
                    &artifacts.workflows_path,
                    &config.scan,
                ),
            );
            report(
                "risks",
                risks::scan_risks(root, &artifacts.risk_path, &config.scan, &config.limits),
            );
            report(
                "bundle",
                bundle::create_bundle(root, &config.bundles.audit, &artifacts.audit_bundle_path),
            );
        }
    }
}
