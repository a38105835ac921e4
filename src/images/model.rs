use std::path::PathBuf;

/// One directory in the scanned pack tree.
///
/// Built fresh on every scan and handed to the caller as a value — the
/// previous tree is simply dropped. A node below the root only exists if it
/// (or a descendant) holds at least one valid image; empty branches are
/// pruned during the scan.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FolderNode {
    pub name: String,
    pub path: PathBuf,
    /// Display scale from the folder's `emoji_scale.json`; `None` = default.
    pub scale: Option<f64>,
    /// Image files directly inside this folder, in presentation order.
    pub images: Vec<PathBuf>,
    pub children: Vec<FolderNode>,
}

impl FolderNode {
    pub fn new(name: String, path: PathBuf) -> Self {
        FolderNode {
            name,
            path,
            scale: None,
            images: Vec::new(),
            children: Vec::new(),
        }
    }

    /// True if this folder holds no images and no surviving children —
    /// the pruning predicate.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.children.is_empty()
    }

    /// Total images in this folder and all descendants.
    pub fn image_count(&self) -> usize {
        self.images.len() + self.children.iter().map(FolderNode::image_count).sum::<usize>()
    }
}

/// One dropped file blob handed to the ingest path: the name the source
/// claimed and the raw bytes. The name's extension is advisory only.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Outcome counters for one ingest batch. Transient — returned to the
/// caller for a summary line, never persisted.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IngestReport {
    /// Written under the canonical name with no collision.
    pub accepted: usize,
    /// Content-hash-named file already present; nothing written.
    pub duplicate_skipped: usize,
    /// Written under a `_1`, `_2`, … suffixed name to dodge a collision.
    pub renamed: usize,
    /// Empty, nameless, or not a recognized image — not written.
    pub invalid: usize,
    /// The claimed extension disagreed with the detected format.
    pub format_corrected: usize,
    /// Per-item failures that were suppressed and logged.
    pub errors: usize,
}

/// Outcome counters for one bulk extension-repair run.
#[derive(Debug, Default, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReconcileReport {
    /// Files renamed to their detected extension.
    pub corrected: usize,
    /// Files deleted because a correctly-named twin already existed.
    pub skipped: usize,
    /// Per-file failures that were suppressed and logged.
    pub errors: usize,
}
