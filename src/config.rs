use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::GameError;
use crate::geometry::FrameBounds;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub class_to_detect: String,
    pub tracking_threshold_px: u32,
    pub max_rep: u32,
    pub calibration_window_secs: f64,
    pub countdown_secs: u64,
    pub frame_width: i32,
    pub frame_height: i32,
    pub frame_margin: i32,
    pub object_size_px: u32,
    pub hit_cue_secs: f64,
    pub level_cue_secs: f64,
    pub bell: bool,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            class_to_detect: "sports ball".to_string(),
            tracking_threshold_px: 20,
            max_rep: 2,
            calibration_window_secs: 3.0,
            countdown_secs: 3,
            frame_width: 640,
            frame_height: 480,
            frame_margin: 40,
            object_size_px: 60,
            hit_cue_secs: 1.0,
            level_cue_secs: 2.5,
            bell: true,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn bounds(&self) -> FrameBounds {
        FrameBounds::new(self.frame_width, self.frame_height, self.frame_margin)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        if self.frame_width <= 0 || self.frame_height <= 0 || self.frame_margin < 0 {
            return Err(GameError::Config(format!(
                "frame {}x{} with margin {} is not drawable",
                self.frame_width, self.frame_height, self.frame_margin
            )));
        }
        if self.frame_height - 2 * self.frame_margin <= 0 {
            return Err(GameError::Config(format!(
                "margin {} leaves no playable height in a {}px frame",
                self.frame_margin, self.frame_height
            )));
        }
        if self.max_rep == 0 {
            return Err(GameError::Config("max_rep must be at least 1".into()));
        }
        if self.tracking_threshold_px == 0 {
            return Err(GameError::Config(
                "tracking_threshold_px must be at least 1".into(),
            ));
        }
        for (name, secs) in [
            ("calibration_window_secs", self.calibration_window_secs),
            ("hit_cue_secs", self.hit_cue_secs),
            ("level_cue_secs", self.level_cue_secs),
        ] {
            seconds(name, secs)?;
        }
        Ok(())
    }

    pub fn calibration_window(&self) -> Duration {
        saturating_secs(self.calibration_window_secs)
    }

    pub fn hit_cue(&self) -> Duration {
        saturating_secs(self.hit_cue_secs)
    }

    pub fn level_cue(&self) -> Duration {
        saturating_secs(self.level_cue_secs)
    }
}

fn seconds(name: &str, secs: f64) -> Result<Duration, GameError> {
    if secs < 0.0 {
        return Err(GameError::Config(format!("{name} must not be negative")));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|_| GameError::Config(format!("{name} is not a usable number of seconds")))
}

// Never panics; out-of-range values are rejected by `validate` beforehand.
fn saturating_secs(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs.max(0.0)).unwrap_or(Duration::MAX)
}

pub trait ConfigStore {
    fn load(&self) -> GameConfig;
    fn save(&self, cfg: &GameConfig) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "spotter") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("spotter_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> GameConfig {
        if let Ok(bytes) = fs::read(&self.path) {
            match serde_json::from_slice::<GameConfig>(&bytes) {
                Ok(cfg) => return cfg,
                Err(e) => log::warn!("ignoring unreadable config {}: {e}", self.path.display()),
            }
        }
        GameConfig::default()
    }

    fn save(&self, cfg: &GameConfig) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg).unwrap_or_default();
        fs::write(&self.path, data)
    }
}
