//! Per-session cache of parsed documents.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::document::{read_document, CachedDocument};
use super::DocumentError;

/// Parsed documents keyed by absolute file path.
///
/// Each path is read at most once. Failures are cached too, as
/// [`CachedDocument::Absent`], so a broken or missing file is not retried.
/// Entries are never invalidated by changes on disk; call
/// [`clear`](Self::clear) to force a re-read.
#[derive(Debug, Default)]
pub struct DocumentCache {
    entries: HashMap<PathBuf, CachedDocument>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the document at `path`, reading it on first use.
    ///
    /// Never fails: unreadable and malformed files yield
    /// [`CachedDocument::Absent`]. Repeated calls return the same `Arc`.
    pub fn load_document(&mut self, path: impl AsRef<Path>) -> CachedDocument {
        let key = cache_key(path.as_ref());

        if let Some(entry) = self.entries.get(&key) {
            tracing::debug!(path = %key.display(), absent = entry.is_absent(), "config cache hit");
            return entry.clone();
        }

        let entry = match read_document(&key) {
            Ok(doc) => {
                tracing::debug!(path = %key.display(), "loaded config document");
                CachedDocument::Parsed(Arc::new(doc))
            }
            Err(DocumentError::Read { source, .. }) => {
                tracing::debug!(
                    path = %key.display(),
                    error = %source,
                    "config document unreadable"
                );
                CachedDocument::Absent
            }
            Err(e) => {
                tracing::warn!(
                    path = %key.display(),
                    error = %e,
                    "ignoring malformed config document"
                );
                CachedDocument::Absent
            }
        };

        self.entries.insert(key, entry.clone());
        entry
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.entries.contains_key(&cache_key(path.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

fn cache_key(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_document_is_cached() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pyproject.toml");
        fs::write(&path, "[tool.flet]\nname = \"demo\"\n").unwrap();

        let mut cache = DocumentCache::new();
        let first = cache.load_document(&path);

        fs::write(&path, "[tool.flet]\nname = \"changed\"\n").unwrap();
        let second = cache.load_document(&path);

        let (first, second) = (first.document().unwrap(), second.document().unwrap());
        assert!(Arc::ptr_eq(first, second));
        assert_eq!(
            second.root()["tool"]["flet"]["name"].as_str(),
            Some("demo")
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_missing_file_is_cached_as_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pyproject.toml");

        let mut cache = DocumentCache::new();
        assert!(cache.load_document(&path).is_absent());

        // Creating the file later does not revive the entry.
        fs::write(&path, "[tool.flet]\nname = \"demo\"\n").unwrap();
        assert!(cache.load_document(&path).is_absent());
        assert!(cache.contains(&path));
    }

    #[test]
    fn test_malformed_file_is_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pyproject.toml");
        fs::write(&path, "[tool.flet\nname = ").unwrap();

        let mut cache = DocumentCache::new();
        assert!(cache.load_document(&path).is_absent());
    }

    #[test]
    fn test_clear_forces_reread() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pyproject.toml");
        fs::write(&path, "name = \"one\"\n").unwrap();

        let mut cache = DocumentCache::new();
        cache.load_document(&path);
        fs::write(&path, "name = \"two\"\n").unwrap();
        cache.clear();
        assert!(cache.is_empty());

        let entry = cache.load_document(&path);
        assert_eq!(
            entry.document().unwrap().root()["name"].as_str(),
            Some("two")
        );
    }

    #[test]
    fn test_equivalent_relative_paths_share_entry() {
        let mut cache = DocumentCache::new();
        cache.load_document("does-not-exist.toml");
        assert!(cache.contains("./does-not-exist.toml"));
    }
}
