//! # repo-audit - Repository Audit Pipeline
//!
//! Enumerates every git-tracked file in a checkout, records canonical
//! per-file metadata, and derives independent report artifacts: disk
//! usage by directory, extension distribution with sampled line counts,
//! directory structure rollups, manifest/CI inventory, and keyword-based
//! sensitive-path surfacing. Selected artifacts are then packaged into
//! distributable archives.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐     ┌───────────────┐
//! │ GitLister  │────▶│ Index Builder │──▶ audit/repo_index.ndjson
//! └────────────┘     └───────────────┘            │
//!                                       ┌─────────┴─────────┐
//!                                       ▼                   ▼
//!                              ┌──────────────┐    ┌───────────────┐
//!                              │  Filetype    │    │  Structure    │
//!                              │  Profiler    │    │  Aggregator   │
//!                              └──────────────┘    └───────────────┘
//!   live tree ──▶ Size Walker, Manifest/CI Scanner, Risk Scanner
//!   artifacts ──▶ Bundler ──▶ audit_bundle.tar.gz
//! ```
//!
//! The NDJSON index is the only shared contract: it is regenerated in
//! full on every run and consumed read-only by the analyzers. The size
//! walker and the scanners read the live filesystem instead, so their
//! universe includes untracked files. Everything runs sequentially and
//! synchronously; a failed stage prints a diagnostic and leaves its
//! artifact absent without affecting the others.
//!
//! ## Modules
//!
//! - [`git`]: tracked-file listing via libgit2
//! - [`index`]: the canonical NDJSON index, writer and tolerant reader
//! - [`analyzers`]: the five derived reports
//! - [`bundle`]: archive packaging
//! - [`config`]: artifact paths, caps, and scan inventories
//! - [`error`]: error types
//! - [`walk`]: shared live-tree walking

/// Independent report analyzers
pub mod analyzers;

/// Archive packaging for report and business-document bundles
pub mod bundle;

/// Pipeline configuration: artifact paths, caps, scan inventories
pub mod config;

/// Error types and utilities
pub mod error;

/// Tracked-file listing backed by the git object store
pub mod git;

/// The canonical per-file NDJSON index
pub mod index;

/// Live-tree walking shared by the filesystem-facing analyzers
pub mod walk;
