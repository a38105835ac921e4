use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

fn default_recent_limit() -> usize {
    12
}

/// Global app config stored in ~/.mojibox/config.json.
///
/// The shell owns the canonical instance; core operations receive the
/// values they need by parameter and never reach into this state.
#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Root of the emoji pack tree the panel browses.
    pub pack_dir: Option<PathBuf>,
    /// Capacity of the recent ring; 0 disables the feature.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    /// Order images newest-first by creation time instead of by name.
    #[serde(default)]
    pub sort_by_created: bool,
    /// Persisted recent ring, most recent first.
    #[serde(default)]
    pub recent: Vec<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            pack_dir: None,
            recent_limit: default_recent_limit(),
            sort_by_created: false,
            recent: Vec::new(),
        }
    }
}

pub fn mojibox_home() -> PathBuf {
    dirs::home_dir()
        .expect("home dir must exist")
        .join(".mojibox")
}

pub fn create_app_dirs(home: &Path) -> Result<()> {
    std::fs::create_dir_all(home.join("logs"))?;
    Ok(())
}

pub fn read_config(home: &Path) -> Result<Config> {
    let path = home.join("config.json");
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = std::fs::read_to_string(&path)?;
    Ok(serde_json::from_str(&text).unwrap_or_default())
}

pub fn write_config(home: &Path, config: &Config) -> Result<()> {
    std::fs::create_dir_all(home)?;
    let tmp = home.join("config.json.tmp");
    std::fs::write(&tmp, serde_json::to_string_pretty(config)?)?;
    std::fs::rename(&tmp, home.join("config.json"))?;
    Ok(())
}

/// Append one audit line to the operation log. Best-effort: a missing logs
/// directory or locked file loses the line, never the operation.
pub fn append_operation_log(home: &Path, event: &str) {
    let log_path = home.join("logs").join("operation.log");
    if let Ok(mut f) = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
    {
        let now = chrono::Utc::now().to_rfc3339();
        let _ = writeln!(f, "[{}] {}", now, event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_home() -> TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_read_config_missing_file() {
        let tmp = temp_home();
        let config = read_config(tmp.path()).unwrap();
        assert!(config.pack_dir.is_none());
        assert_eq!(config.recent_limit, 12);
        assert!(!config.sort_by_created);
        assert!(config.recent.is_empty());
    }

    #[test]
    fn test_write_and_read_config_round_trip() {
        let tmp = temp_home();
        let home = tmp.path();
        let config = Config {
            pack_dir: Some(PathBuf::from("/packs")),
            recent_limit: 5,
            sort_by_created: true,
            recent: vec![PathBuf::from("/packs/a.png"), PathBuf::from("/packs/b.png")],
        };
        write_config(home, &config).unwrap();
        let loaded = read_config(home).unwrap();
        assert_eq!(loaded.pack_dir, Some(PathBuf::from("/packs")));
        assert_eq!(loaded.recent_limit, 5);
        assert!(loaded.sort_by_created);
        assert_eq!(loaded.recent.len(), 2);
    }

    #[test]
    fn test_read_config_malformed_json_no_crash() {
        let tmp = temp_home();
        let home = tmp.path();
        std::fs::create_dir_all(home).unwrap();
        std::fs::write(home.join("config.json"), b"not valid json }{").unwrap();
        // Must not panic; returns default
        let config = read_config(home).unwrap();
        assert!(config.pack_dir.is_none());
    }

    #[test]
    fn test_config_missing_fields_use_defaults() {
        let tmp = temp_home();
        let home = tmp.path();
        std::fs::create_dir_all(home).unwrap();
        // A config written before recent/sort fields existed must still load.
        std::fs::write(home.join("config.json"), br#"{"pack_dir":"/old"}"#).unwrap();
        let config = read_config(home).unwrap();
        assert_eq!(config.pack_dir, Some(PathBuf::from("/old")));
        assert_eq!(config.recent_limit, 12);
        assert!(config.recent.is_empty());
    }

    #[test]
    fn test_append_operation_log() {
        let tmp = temp_home();
        let home = tmp.path();
        create_app_dirs(home).unwrap();
        append_operation_log(home, "RECONCILE_RUN corrected=3 skipped=1 errors=0");
        let content =
            std::fs::read_to_string(home.join("logs").join("operation.log")).unwrap();
        assert!(content.contains("RECONCILE_RUN corrected=3"));
    }

    #[test]
    fn test_append_operation_log_without_logs_dir_is_silent() {
        let tmp = temp_home();
        // logs/ was never created — the line is lost, nothing panics.
        append_operation_log(tmp.path(), "INGEST_RUN accepted=1");
        assert!(!tmp.path().join("logs").join("operation.log").exists());
    }
}
