use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Default log file, `~/.local/state/spotter/spotter.log` where HOME is set.
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("spotter");
            Some(state_dir.join("spotter.log"))
        } else {
            ProjectDirs::from("", "", "spotter")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("spotter.log"))
        }
    }
}
