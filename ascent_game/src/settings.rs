// ascent_game/src/settings.rs
use ascent_core::constants::{DATA_FOLDER, FIXED_DT};
use ascent_core::error::AscentResult;
use ascent_core::onscreen_info;
use ascent_core::storage::core_storage::{data_dir_from_exe, read_toml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Drives rooms to completion so the kiosk can run unattended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AutopilotSettings {
    pub enabled: bool,
    /// Seconds spent in a room before its puzzle is solved.
    pub solve_delay: f32,
    /// Seconds between solving a room and pressing the elevator button.
    pub press_delay: f32,
}

impl Default for AutopilotSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            solve_delay: 2.0,
            press_delay: 1.0,
        }
    }
}

/// Runtime settings of the kiosk binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub log_level: String,
    /// Folder holding the .ron game data. Defaults to `data` beside the executable.
    pub data_dir: Option<PathBuf>,
    pub frame_step: f32,
    /// Stop after this many frames. Runs forever when unset.
    pub max_frames: Option<u64>,
    /// Pace frames against the wall clock.
    pub realtime: bool,
    /// Frames every scene load takes.
    pub loader_latency_frames: u32,
    pub autopilot: AutopilotSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            data_dir: None,
            frame_step: FIXED_DT,
            max_frames: None,
            realtime: true,
            loader_latency_frames: 30,
            autopilot: AutopilotSettings::default(),
        }
    }
}

impl Settings {
    /// Reads the settings file, or the defaults when there is none.
    pub fn load(path: &Path) -> AscentResult<Settings> {
        if !path.exists() {
            onscreen_info!("No settings at {}, using defaults.", path.display());
            return Ok(Settings::default());
        }
        read_toml(path)
    }

    /// Fixed step in seconds, never zero.
    pub fn step(&self) -> f32 {
        if self.frame_step > 0.0 { self.frame_step } else { FIXED_DT }
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(data_dir_from_exe)
            .unwrap_or_else(|| PathBuf::from(DATA_FOLDER))
    }
}
