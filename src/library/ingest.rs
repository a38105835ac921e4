use crate::images::format;
use crate::images::model::{IncomingFile, IngestReport};
use std::fs;
use std::path::{Path, PathBuf};

/// The whole batch could not even start — nothing was written.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("ingest target is not a directory: {0}")]
    TargetNotADirectory(PathBuf),
}

/// Commit a batch of dropped file blobs into `target`.
///
/// Every item is validated by byte signature before anything touches disk —
/// the claimed filename extension is advisory only and is replaced by the
/// detected format's canonical extension. Name collisions resolve
/// deterministically: a colliding 32-hex content-hash name is a true
/// duplicate and is skipped; any other collision gets a `_1`, `_2`, …
/// suffix. One bad item never aborts the batch.
pub fn ingest_files(
    target: &Path,
    items: Vec<IncomingFile>,
) -> Result<IngestReport, IngestError> {
    if !target.is_dir() {
        return Err(IngestError::TargetNotADirectory(target.to_path_buf()));
    }

    let mut report = IngestReport::default();
    for item in items {
        ingest_one(target, item, &mut report);
    }

    tracing::info!(
        "ingest_files {:?}: accepted={} duplicates={} renamed={} invalid={} corrected={} errors={}",
        target,
        report.accepted,
        report.duplicate_skipped,
        report.renamed,
        report.invalid,
        report.format_corrected,
        report.errors
    );
    Ok(report)
}

fn ingest_one(target: &Path, item: IncomingFile, report: &mut IngestReport) {
    if item.name.is_empty() || item.bytes.is_empty() {
        report.invalid += 1;
        return;
    }

    // The primary defense: no recognized signature, no write.
    let detected = match format::detect_format(&item.bytes) {
        Some(f) => f,
        None => {
            tracing::debug!("ingest: {:?} is not a recognized image", item.name);
            report.invalid += 1;
            return;
        }
    };

    let claimed = Path::new(&item.name);
    let stem = match claimed.file_stem().and_then(|s| s.to_str()) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => {
            report.invalid += 1;
            return;
        }
    };
    let claimed_ext = claimed
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    // The canonical name discards whatever extension the drop claimed.
    let canonical_ext = detected.extension();
    let extension_changed = claimed_ext != canonical_ext;
    let canonical = target.join(format!("{}.{}", stem, canonical_ext));

    if canonical.exists() {
        if is_content_hash_name(&stem) {
            // The name IS the content hash — same name, same bytes.
            report.duplicate_skipped += 1;
            return;
        }
        let dest = free_suffixed_name(target, &stem, canonical_ext);
        match fs::write(&dest, &item.bytes) {
            Ok(()) => {
                report.renamed += 1;
                if extension_changed {
                    report.format_corrected += 1;
                }
            }
            Err(e) => {
                tracing::warn!("ingest: cannot write {:?}: {}", dest, e);
                report.errors += 1;
            }
        }
    } else {
        match fs::write(&canonical, &item.bytes) {
            Ok(()) => {
                report.accepted += 1;
                if extension_changed {
                    report.format_corrected += 1;
                }
            }
            Err(e) => {
                tracing::warn!("ingest: cannot write {:?}: {}", canonical, e);
                report.errors += 1;
            }
        }
    }
}

/// Probe `stem_1.ext`, `stem_2.ext`, … until a free name is found.
fn free_suffixed_name(target: &Path, stem: &str, ext: &str) -> PathBuf {
    let mut counter: u32 = 1;
    loop {
        let candidate = target.join(format!("{}_{}.{}", stem, counter, ext));
        if !candidate.exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// True iff `stem` follows the upstream chat app's content-hash naming
/// convention: exactly 32 hex digits. For such names a collision means the
/// bytes are already on disk.
pub fn is_content_hash_name(stem: &str) -> bool {
    stem.len() == 32 && stem.chars().all(|c| c.is_ascii_hexdigit())
}
