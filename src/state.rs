use crate::recent::RecentRing;
use crate::settings::manager::Config;
use std::sync::Mutex;

/// The one shared handle the shell manages across its windows. Core
/// operations take plain parameters; this only keeps the canonical config
/// and recent ring in a single place between invocations.
pub struct AppState {
    pub config: Mutex<Config>,
    pub recent: Mutex<RecentRing>,
}

impl Default for AppState {
    fn default() -> Self {
        let config = Config::default();
        let recent = RecentRing::new(config.recent_limit);
        Self {
            config: Mutex::new(config),
            recent: Mutex::new(recent),
        }
    }
}

impl AppState {
    /// Restore state from a loaded config, rebuilding the recent ring from
    /// the persisted path list.
    pub fn from_config(config: Config) -> Self {
        let recent = RecentRing::from_paths(config.recent.clone(), config.recent_limit);
        Self {
            config: Mutex::new(config),
            recent: Mutex::new(recent),
        }
    }
}
