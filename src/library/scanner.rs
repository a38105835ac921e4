use crate::images::format;
use crate::images::model::FolderNode;
use crate::library::scale;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Build the pack tree under `base`.
///
/// The root node is always returned (possibly empty, so the panel can render
/// an empty state); below it, a folder survives only if it or a descendant
/// holds at least one valid image. Permission errors and unreadable files
/// are logged and skipped — a scan never fails as a whole.
///
/// `sort_by_created`: order each folder's images newest-first by file
/// creation time (files with no readable timestamp last) instead of by name.
pub fn scan_tree(base: &Path, sort_by_created: bool) -> FolderNode {
    let tree = scan_folder(base, sort_by_created);
    tracing::debug!(
        "scan_tree {:?}: {} images in {} direct children",
        base,
        tree.image_count(),
        tree.children.len()
    );
    tree
}

fn scan_folder(dir: &Path, sort_by_created: bool) -> FolderNode {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut node = FolderNode::new(name, dir.to_path_buf());
    node.scale = scale::read_scale(dir);

    let entries = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) => {
            tracing::debug!("scan: cannot enumerate {:?}: {}", dir, e);
            return node;
        }
    };

    let mut images: Vec<PathBuf> = Vec::new();
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(t) => t,
            Err(_) => continue,
        };
        if file_type.is_dir() {
            let child = scan_folder(&path, sort_by_created);
            if !child.is_empty() {
                node.children.push(child);
            }
        } else if file_type.is_file() && is_image_candidate(&path) {
            images.push(path);
        }
        // Symlinks fall through both arms and are skipped.
    }

    // Folder order is navigation chrome — always by name.
    node.children
        .sort_by(|a, b| cmp_case_insensitive(&a.name, &b.name));

    if sort_by_created {
        sort_newest_first(&mut images);
    } else {
        images.sort_by(|a, b| cmp_case_insensitive(&file_name_of(a), &file_name_of(b)));
    }
    node.images = images;
    node
}

/// Classify one file, cheapest check first:
/// 1. recognized image extension → accept without reading;
/// 2. recognized non-image extension → skip without reading
///    (even if the bytes were secretly an image — deliberate policy);
/// 3. anything else (no extension, unknown, or the placeholder suffix the
///    upstream exporter writes) → read the bytes and trust the signature.
fn is_image_candidate(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    if format::is_image_extension(&ext) {
        return true;
    }
    if format::is_denylisted_extension(&ext) {
        return false;
    }

    match fs::read(path) {
        Ok(bytes) => format::detect_format(&bytes).is_some(),
        Err(e) => {
            tracing::debug!("scan: cannot read suspicious file {:?}: {}", path, e);
            false
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn cmp_case_insensitive(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Newest creation time first; files whose timestamp cannot be read sort
/// last (some filesystems report no birth time at all).
fn sort_newest_first(images: &mut Vec<PathBuf>) {
    let mut keyed: Vec<(PathBuf, Option<SystemTime>)> = std::mem::take(images)
        .into_iter()
        .map(|p| {
            let created = fs::metadata(&p).and_then(|m| m.created()).ok();
            (p, created)
        })
        .collect();
    keyed.sort_by(|(_, a), (_, b)| match (a, b) {
        (Some(x), Some(y)) => y.cmp(x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    *images = keyed.into_iter().map(|(p, _)| p).collect();
}
