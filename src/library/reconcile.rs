use crate::images::format;
use crate::images::model::ReconcileReport;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Walk the whole tree under `root` and repair every file whose extension
/// disagrees with its detected format. Best-effort and idempotent: a second
/// run over a repaired tree reports `corrected == 0`.
///
/// Per file: undetectable content is left alone; a matching extension
/// (alias-aware, so `.jpeg` is already correct) is left alone; placeholder
/// `.dat` files are left for the ingest path to name. Otherwise the file is
/// renamed to `<stem>.<detected>` — unless that name already exists, in
/// which case the file is a duplicate and is deleted instead.
///
/// No failure aborts the walk; each one increments `errors` and processing
/// continues with the next file.
pub fn reconcile_extensions(root: &Path) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    // Collect first, mutate after — renames and deletes must not race the
    // live traversal.
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        match entry {
            Err(e) => {
                tracing::warn!("reconcile: walk error under {:?}: {}", root, e);
                report.errors += 1;
            }
            Ok(entry) => {
                if entry.file_type().is_file() {
                    files.push(entry.into_path());
                }
            }
        }
    }

    for path in files {
        if let Err(e) = reconcile_file(&path, &mut report) {
            tracing::warn!("reconcile: {:?}: {}", path, e);
            report.errors += 1;
        }
    }

    tracing::info!(
        "reconcile_extensions {:?}: corrected={} skipped={} errors={}",
        root,
        report.corrected,
        report.skipped,
        report.errors
    );
    report
}

fn reconcile_file(path: &Path, report: &mut ReconcileReport) -> io::Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    // Placeholder files are the ingest path's to rename — touching them here
    // would rename every exported file twice.
    if ext == format::PLACEHOLDER_EXTENSION {
        return Ok(());
    }

    let bytes = fs::read(path)?;
    let detected = match format::detect_format(&bytes) {
        Some(f) => f,
        None => return Ok(()),
    };
    if detected.matches_extension(&ext) {
        return Ok(());
    }

    let stem = match path.file_stem().and_then(|s| s.to_str()) {
        Some(s) => s,
        None => return Ok(()),
    };
    let corrected = path.with_file_name(format!("{}.{}", stem, detected.extension()));

    if corrected.exists() {
        // A correctly-named twin already stands in for this file.
        fs::remove_file(path)?;
        report.skipped += 1;
    } else {
        fs::rename(path, &corrected)?;
        report.corrected += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_tmp() -> TempDir {
        tempfile::tempdir().unwrap()
    }

    const PNG: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG: [u8; 8] = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0xFF, 0xD9];

    #[test]
    fn test_reconcile_renames_wrong_extension() {
        let tmp = make_tmp();
        fs::write(tmp.path().join("sticker.png"), JPEG).unwrap();

        let report = reconcile_extensions(tmp.path());
        assert_eq!(report.corrected, 1);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.errors, 0);
        assert!(tmp.path().join("sticker.jpg").exists());
        assert!(!tmp.path().join("sticker.png").exists());
    }

    #[test]
    fn test_reconcile_leaves_correct_files_alone() {
        let tmp = make_tmp();
        fs::write(tmp.path().join("ok.png"), PNG).unwrap();
        // Alias: .jpeg already names the JPEG format — no churn rename.
        fs::write(tmp.path().join("also_ok.jpeg"), JPEG).unwrap();

        let report = reconcile_extensions(tmp.path());
        assert_eq!(report.corrected, 0);
        assert!(tmp.path().join("ok.png").exists());
        assert!(tmp.path().join("also_ok.jpeg").exists());
    }

    #[test]
    fn test_reconcile_leaves_placeholder_files_alone() {
        let tmp = make_tmp();
        fs::write(tmp.path().join("exported.dat"), PNG).unwrap();

        let report = reconcile_extensions(tmp.path());
        assert_eq!(report.corrected, 0);
        assert!(
            tmp.path().join("exported.dat").exists(),
            ".dat files belong to the ingest path"
        );
    }

    #[test]
    fn test_reconcile_leaves_undetectable_files_alone() {
        let tmp = make_tmp();
        fs::write(tmp.path().join("mystery.png"), b"not an image").unwrap();

        let report = reconcile_extensions(tmp.path());
        assert_eq!(report.corrected, 0);
        assert_eq!(report.errors, 0);
        assert!(tmp.path().join("mystery.png").exists());
    }

    #[test]
    fn test_reconcile_deletes_duplicate_when_target_exists() {
        let tmp = make_tmp();
        fs::write(tmp.path().join("twin.jpg"), JPEG).unwrap();
        fs::write(tmp.path().join("twin.png"), JPEG).unwrap();

        let report = reconcile_extensions(tmp.path());
        assert_eq!(report.skipped, 1);
        assert_eq!(report.corrected, 0);
        assert!(tmp.path().join("twin.jpg").exists());
        assert!(
            !tmp.path().join("twin.png").exists(),
            "the mis-named duplicate must be deleted"
        );
    }

    #[test]
    fn test_reconcile_recurses_into_subdirectories() {
        let tmp = make_tmp();
        let sub = tmp.path().join("pack").join("deep");
        fs::create_dir_all(&sub).unwrap();
        fs::write(sub.join("a.gif"), PNG).unwrap();

        let report = reconcile_extensions(tmp.path());
        assert_eq!(report.corrected, 1);
        assert!(sub.join("a.png").exists());
    }

    #[test]
    fn test_reconcile_idempotent() {
        // WHY: this is a bulk repair pass — a second run over an already
        // corrected tree must be a no-op, or every re-run would churn names.
        let tmp = make_tmp();
        fs::write(tmp.path().join("one.png"), JPEG).unwrap();
        fs::write(tmp.path().join("two.bmp"), PNG).unwrap();

        let first = reconcile_extensions(tmp.path());
        assert_eq!(first.corrected, 2);

        let second = reconcile_extensions(tmp.path());
        assert_eq!(second.corrected, 0, "second run must correct nothing");
        assert_eq!(second.skipped, 0);
        assert_eq!(second.errors, 0);
    }

    #[test]
    #[cfg(unix)]
    fn test_reconcile_counts_unreadable_subdir_as_error() {
        use std::os::unix::fs::PermissionsExt;
        let tmp = make_tmp();
        let locked = tmp.path().join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::write(tmp.path().join("fine.png"), JPEG).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let report = reconcile_extensions(tmp.path());

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(report.corrected, 1, "the readable file is still repaired");
        assert!(
            report.errors >= 1,
            "the unreadable branch must be observable in the error count"
        );
    }
}
