//! Risk surface scanner
//!
//! Flags tracked paths whose lowercased form contains a sensitive
//! keyword. A path matches at most once (first keyword wins) and the
//! output is capped as an explicit safety bound, not a ranking.

use crate::config::{LimitConfig, ScanConfig};
use crate::git::GitLister;
use crate::walk;
use anyhow::Result;
use std::path::Path;

/// First keyword contained in the lowercased path, if any.
pub fn first_keyword_match<'a>(path: &str, keywords: &'a [String]) -> Option<&'a str> {
    let lower = path.to_lowercase();
    keywords
        .iter()
        .find(|k| lower.contains(k.as_str()))
        .map(|k| k.as_str())
}

/// The set of paths the scanner examines.
///
/// Tracked files when the repository can be listed; otherwise the live
/// tree. The fallback widens the universe from tracked-only to
/// everything on disk, so it is logged loudly rather than silently.
fn path_universe(root: &Path, scan: &ScanConfig) -> Vec<String> {
    match GitLister::discover(root).and_then(|lister| lister.list_tracked()) {
        Ok(files) => files.into_iter().map(|f| f.path).collect(),
        Err(e) => {
            tracing::warn!(
                "Tracked-file listing failed ({}); falling back to a filesystem walk. \
                 The scan now covers untracked files too.",
                e
            );
            walk::walk_files(root, &scan.excluded_dirs)
        }
    }
}

/// Collect up to `max_risk_matches` flagged paths in enumeration order.
pub fn collect_matches(paths: &[String], scan: &ScanConfig, limits: &LimitConfig) -> Vec<String> {
    let mut matches = Vec::new();
    for path in paths {
        if first_keyword_match(path, &scan.risk_keywords).is_some() {
            matches.push(path.clone());
            if matches.len() >= limits.max_risk_matches {
                tracing::warn!(
                    "Risk match cap of {} reached; output is truncated",
                    limits.max_risk_matches
                );
                break;
            }
        }
    }
    matches
}

/// Run the scanner and write the newline-delimited artifact.
pub fn scan_risks(
    root: &Path,
    out: &Path,
    scan: &ScanConfig,
    limits: &LimitConfig,
) -> Result<Vec<String>> {
    let paths = path_universe(root, scan);
    let matches = collect_matches(&paths, scan, limits);

    super::write_lines(out, &matches)?;
    tracing::info!("Wrote {} ({} matches)", out.display(), matches.len());
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuditConfig;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_first_keyword_short_circuits() {
        let scan = ScanConfig::default();
        // "MyAuthToken.txt" contains both "auth" and "token"; only the
        // first keyword in list order is reported
        let hit = first_keyword_match("docs/MyAuthToken.txt", &scan.risk_keywords);
        assert_eq!(hit, Some("auth"));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let scan = ScanConfig::default();
        assert!(first_keyword_match("config/STRIPE_KEYS.md", &scan.risk_keywords).is_some());
        assert!(first_keyword_match("src/render.rs", &scan.risk_keywords).is_none());
    }

    #[test]
    fn test_double_keyword_path_flagged_once() {
        let config = AuditConfig::default();
        let paths = vec!["a/MyAuthToken.txt".to_string()];
        let matches = collect_matches(&paths, &config.scan, &config.limits);
        assert_eq!(matches, vec!["a/MyAuthToken.txt"]);
    }

    #[test]
    fn test_match_cap() {
        let config = AuditConfig::default();
        let mut limits = config.limits.clone();
        limits.max_risk_matches = 3;

        let paths: Vec<String> = (0..10).map(|i| format!("secrets/{i}.txt")).collect();
        let matches = collect_matches(&paths, &config.scan, &limits);

        // Cap keeps the first N in enumeration order
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0], "secrets/0.txt");
    }

    #[test]
    fn test_fallback_walk_outside_repo() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("conf")).unwrap();
        fs::write(dir.path().join("conf/credentials.ini"), "x").unwrap();
        fs::write(dir.path().join("conf/plain.ini"), "x").unwrap();

        let config = AuditConfig::default();
        let out = dir.path().join("risks.txt");
        let matches = scan_risks(dir.path(), &out, &config.scan, &config.limits).expect("scan");

        assert_eq!(matches, vec!["conf/credentials.ini"]);
        assert!(out.exists());
    }
}
