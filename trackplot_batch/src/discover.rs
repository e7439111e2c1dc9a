//! Track file discovery.

use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Finds every file under `root` (recursively) with the given extension, sorted by path.
///
/// The sort makes index assignment independent of directory listing order.
/// Unreadable entries, including a missing root, are logged and skipped.
pub fn discover_tracks(root: &Path, extension: &str) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                None
            }
        })
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some(extension))
        .collect();
    
    files.sort();
    files
}
