//! Live-tree walking shared by the analyzers that do not consume the index
//!
//! Walks never follow symlinks, skip excluded directory names wholesale,
//! and swallow per-entry errors: a single unreadable entry contributes
//! nothing rather than failing the walk.

use std::path::Path;
use walkdir::WalkDir;

/// True when a directory entry's name is on the exclusion list
pub fn is_excluded(name: &std::ffi::OsStr, excluded: &[String]) -> bool {
    match name.to_str() {
        Some(name) => excluded.iter().any(|e| e == name),
        None => false,
    }
}

/// Repository-relative path with forward slashes, None for non-UTF-8
pub fn to_unix_relative(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let s = relative.to_str()?;
    if std::path::MAIN_SEPARATOR == '/' {
        Some(s.to_string())
    } else {
        Some(s.replace(std::path::MAIN_SEPARATOR, "/"))
    }
}

/// Collect every file under `root` as a relative forward-slash path,
/// in walk order, skipping excluded directory names.
pub fn walk_files(root: &Path, excluded: &[String]) -> Vec<String> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| !(entry.file_type().is_dir() && is_excluded(entry.file_name(), excluded)));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        if let Some(path) = to_unix_relative(root, entry.path()) {
            files.push(path);
        }
    }

    files
}
