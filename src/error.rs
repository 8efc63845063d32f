/// Centralized error types for repo-audit using thiserror
///
/// Only the fatal-to-stage domains get dedicated enums: git listing
/// failures (which abort the index build) and index-artifact failures
/// (which abort the analyzer consuming it). Everything else degrades
/// per record and never surfaces as an error.
use thiserror::Error;

/// Main error type for the audit pipeline
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("Bundle error: {0}")]
    Bundle(#[from] BundleError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors related to listing tracked files from the repository
#[derive(Error, Debug)]
pub enum GitError {
    #[error("Git repository not found at: {0}")]
    RepoNotFound(String),

    #[error("Failed to open git repository: {0}")]
    OpenFailed(String),

    #[error("Failed to read the git index: {0}")]
    IndexReadFailed(String),
}

/// Errors related to the canonical index artifact
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Index file not found: {0}")]
    NotFound(String),

    #[error("Failed to open index file '{path}': {reason}")]
    OpenFailed { path: String, reason: String },

    #[error("Failed to write index to '{path}': {reason}")]
    WriteFailed { path: String, reason: String },
}

/// Errors related to bundle creation
#[derive(Error, Debug)]
pub enum BundleError {
    #[error("Failed to create archive '{path}': {reason}")]
    CreateFailed { path: String, reason: String },

    #[error("Failed to add '{member}' to archive: {reason}")]
    AppendFailed { member: String, reason: String },
}

impl From<anyhow::Error> for AuditError {
    fn from(err: anyhow::Error) -> Self {
        AuditError::Other(format!("{:#}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuditError::Git(GitError::RepoNotFound("/tmp/nowhere".to_string()));
        assert_eq!(
            err.to_string(),
            "Git error: Git repository not found at: /tmp/nowhere"
        );
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let audit_err: AuditError = io_err.into();
        assert!(matches!(audit_err, AuditError::Io(_)));
    }

    #[test]
    fn test_error_from_anyhow() {
        let anyhow_err = anyhow::anyhow!("walk failed");
        let audit_err: AuditError = anyhow_err.into();
        assert!(matches!(audit_err, AuditError::Other(_)));
    }

    #[test]
    fn test_index_error_open_failed() {
        let err = IndexError::OpenFailed {
            path: "audit/repo_index.ndjson".to_string(),
            reason: "permission denied".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to open index file 'audit/repo_index.ndjson': permission denied"
        );
    }
}
