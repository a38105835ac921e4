use std::path::{Path, PathBuf};

/// Bounded most-recently-used list of copied image paths.
///
/// Order is recency (front = most recent), entries are unique, and length
/// never exceeds the configured capacity. Purely in-memory — persistence
/// belongs to the settings collaborator, which stores the ring as a plain
/// path list and restores it through [`RecentRing::from_paths`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentRing {
    entries: Vec<PathBuf>,
    capacity: usize,
}

impl RecentRing {
    pub fn new(capacity: usize) -> Self {
        RecentRing {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Rebuild a ring from a persisted path list, re-applying the
    /// invariants in case the stored data predates a capacity change or
    /// was edited by hand: duplicates collapse to their first (most recent)
    /// occurrence and the tail is trimmed to capacity.
    pub fn from_paths(paths: Vec<PathBuf>, capacity: usize) -> Self {
        let mut entries: Vec<PathBuf> = Vec::new();
        for path in paths {
            if !entries.contains(&path) {
                entries.push(path);
            }
        }
        entries.truncate(capacity);
        RecentRing { entries, capacity }
    }

    /// Record a copy of `path` as the most recent.
    ///
    /// No-op for empty paths and for files that no longer exist. Capacity
    /// zero means the feature is disabled: the ring is cleared instead.
    pub fn add(&mut self, path: &Path) {
        if path.as_os_str().is_empty() || !path.exists() {
            return;
        }
        if self.capacity == 0 {
            self.entries.clear();
            return;
        }
        self.entries.retain(|p| p != path);
        self.entries.insert(0, path.to_path_buf());
        self.entries.truncate(self.capacity);
    }

    /// Remove every occurrence of `path`; absent paths are a no-op.
    pub fn remove(&mut self, path: &Path) {
        self.entries.retain(|p| p != path);
    }

    /// Drop entries whose files no longer exist, preserving the relative
    /// order of survivors. Called on demand (e.g. before rendering the
    /// recent row), not eagerly.
    pub fn cleanup(&mut self) {
        self.entries.retain(|p| p.exists());
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
