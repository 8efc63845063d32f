//! Tracked-file listing backed by the git object store
//!
//! Enumerates the repository index and resolves each entry's blob size
//! in-process. The original pipeline shelled out twice per path
//! (`ls-files -s`, `cat-file -s`); going through libgit2 batches the
//! whole lookup into one pass without changing per-record behavior.

use crate::error::GitError;
use git2::Repository;
use std::path::{Path, PathBuf};

/// Why a tracked file's metadata could not be fully resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradeReason {
    /// The index entry's blob was missing from the object store
    BlobLookupFailed,
}

/// A single tracked file as reported by the lister
///
/// `degraded` is `Some` when metadata lookup failed and the record fell
/// back to safe defaults (`size_bytes = 0`, `blob_sha = None`).
#[derive(Debug, Clone)]
pub struct TrackedFile {
    /// Repository-relative path, forward-slash separated
    pub path: String,
    /// Stored blob size in bytes, 0 when lookup failed
    pub size_bytes: u64,
    /// Content-addressed blob id, None when lookup failed
    pub blob_sha: Option<String>,
    pub degraded: Option<DegradeReason>,
}

/// Lister over the tracked files of a git repository
pub struct GitLister {
    repo: Repository,
    repo_path: PathBuf,
}

impl GitLister {
    /// Discover and open a git repository from any path within it
    pub fn discover<P: AsRef<Path>>(path: P) -> Result<Self, GitError> {
        let path = path.as_ref();

        // Discover walks up the directory tree, so analyzers can run
        // from any subdirectory of the checkout.
        let repo = Repository::discover(path)
            .map_err(|_| GitError::RepoNotFound(path.display().to_string()))?;

        let repo_path = repo
            .path()
            .parent()
            .ok_or_else(|| GitError::OpenFailed("repository has no working tree".to_string()))?
            .to_path_buf();

        tracing::info!("Opened git repository at: {}", repo_path.display());

        Ok(Self { repo, repo_path })
    }

    /// Get the repository root path
    pub fn repo_path(&self) -> &Path {
        &self.repo_path
    }

    /// List every tracked file in index order, resolving blob sizes.
    ///
    /// Entry paths that are not valid UTF-8 are dropped (the index is a
    /// text artifact; this is a documented lossy edge case). Blob lookup
    /// failures degrade that one record and never abort the listing.
    pub fn list_tracked(&self) -> Result<Vec<TrackedFile>, GitError> {
        let index = self
            .repo
            .index()
            .map_err(|e| GitError::IndexReadFailed(e.message().to_string()))?;

        let mut files = Vec::with_capacity(index.len());
        let mut dropped = 0usize;
        let mut degraded = 0usize;

        for entry in index.iter() {
            let path = match String::from_utf8(entry.path.clone()) {
                Ok(p) => p,
                Err(_) => {
                    tracing::debug!("Dropping tracked path with non-UTF-8 name");
                    dropped += 1;
                    continue;
                }
            };

            let file = match self.repo.find_blob(entry.id) {
                Ok(blob) => TrackedFile {
                    path,
                    size_bytes: blob.size() as u64,
                    blob_sha: Some(entry.id.to_string()),
                    degraded: None,
                },
                Err(e) => {
                    tracing::debug!("Blob lookup failed for {}: {}", path, e.message());
                    degraded += 1;
                    TrackedFile {
                        path,
                        size_bytes: 0,
                        blob_sha: None,
                        degraded: Some(DegradeReason::BlobLookupFailed),
                    }
                }
            };
            files.push(file);
        }

        if dropped > 0 {
            tracing::warn!("Dropped {} tracked paths with non-UTF-8 names", dropped);
        }
        if degraded > 0 {
            tracing::warn!("{} tracked files degraded to size 0", degraded);
        }
        tracing::info!("Listed {} tracked files", files.len());

        Ok(files)
    }
}
