use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Per-folder display-scale sidecar. A pack folder may carry an
/// `emoji_scale.json` next to its images; absence means default scale.
pub const SCALE_FILE_NAME: &str = "emoji_scale.json";

#[derive(Debug, Serialize, Deserialize)]
struct ScaleSidecar {
    scale: f64,
}

/// Read the folder's display scale. Absent, unreadable, or malformed
/// sidecars all mean "use the default" — never an error.
pub fn read_scale(folder: &Path) -> Option<f64> {
    let path = folder.join(SCALE_FILE_NAME);
    let text = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str::<ScaleSidecar>(&text) {
        Ok(sidecar) => Some(sidecar.scale),
        Err(e) => {
            tracing::debug!("malformed {} in {:?}: {}", SCALE_FILE_NAME, folder, e);
            None
        }
    }
}

/// Write the folder's display scale as a whole-file JSON write.
pub fn write_scale(folder: &Path, scale: f64) -> Result<()> {
    let path = folder.join(SCALE_FILE_NAME);
    std::fs::write(&path, serde_json::to_string(&ScaleSidecar { scale })?)?;
    Ok(())
}

/// Remove the folder's scale sidecar, reverting it to the default scale.
/// Removing an absent sidecar is not an error.
pub fn clear_scale(folder: &Path) -> Result<()> {
    let path = folder.join(SCALE_FILE_NAME);
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_tmp() -> TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_read_scale_missing_file() {
        let tmp = make_tmp();
        assert_eq!(read_scale(tmp.path()), None);
    }

    #[test]
    fn test_write_and_read_scale_round_trip() {
        let tmp = make_tmp();
        write_scale(tmp.path(), 1.5).unwrap();
        assert_eq!(read_scale(tmp.path()), Some(1.5));
    }

    #[test]
    fn test_read_scale_malformed_json_no_crash() {
        let tmp = make_tmp();
        std::fs::write(tmp.path().join(SCALE_FILE_NAME), b"not json }{").unwrap();
        assert_eq!(read_scale(tmp.path()), None);
    }

    #[test]
    fn test_clear_scale() {
        let tmp = make_tmp();
        write_scale(tmp.path(), 0.75).unwrap();
        clear_scale(tmp.path()).unwrap();
        assert_eq!(read_scale(tmp.path()), None);
        // Clearing twice must stay Ok
        clear_scale(tmp.path()).unwrap();
    }
}
