// ascent_core/src/storage/core_storage.rs
use crate::constants::*;
use crate::elevator::elevator::ElevatorSettings;
use crate::error::{AscentError, AscentResult};
use crate::game::game_manager::GameManagerTemplate;
use crate::onscreen_warn;
use crate::scene::layout::SceneCatalog;
use directories_next::ProjectDirs;
use ron::ser::{to_string_pretty, PrettyConfig};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Returns the app_dir for the program.
pub fn app_dir() -> PathBuf {
    if let Some(project_dir) = ProjectDirs::from("com", "ascent", "ascent") {
        project_dir.config_dir().to_path_buf()
    } else {
        // No home directory on some kiosk images
        std::env::temp_dir().join("ascent")
    }
}

/// Gets the data folder next to the running executable.
pub fn data_dir_from_exe() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.parent().map(|p| p.join(DATA_FOLDER))
}

fn read_text(path: &Path) -> AscentResult<String> {
    fs::read_to_string(path).map_err(|source| AscentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a .ron file.
pub fn read_ron<T: DeserializeOwned>(path: &Path) -> AscentResult<T> {
    let text = read_text(path)?;
    ron::from_str(&text).map_err(|source| AscentError::Ron {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `value` as pretty .ron, creating parent folders.
pub fn save_ron<T: Serialize>(path: &Path, value: &T) -> AscentResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| AscentError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let ron = to_string_pretty(value, PrettyConfig::default()).map_err(|source| AscentError::RonWrite {
        path: path.to_path_buf(),
        source,
    })?;

    fs::write(path, ron).map_err(|source| AscentError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads and parses a .toml file.
pub fn read_toml<T: DeserializeOwned>(path: &Path) -> AscentResult<T> {
    let text = read_text(path)?;
    toml::from_str(&text).map_err(|source| AscentError::Toml {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the game manager template from a data folder.
pub fn load_game_template(folder: &Path) -> AscentResult<GameManagerTemplate> {
    read_ron(&folder.join(MASTER_CONFIG_RON))
}

/// Loads every authored room scene from a data folder.
pub fn load_scene_catalog(folder: &Path) -> AscentResult<SceneCatalog> {
    read_ron(&folder.join(SCENES_RON))
}

/// Loads the elevator tuning. A missing file falls back to the defaults.
pub fn load_elevator_settings(folder: &Path) -> AscentResult<ElevatorSettings> {
    let path = folder.join(ELEVATOR_RON);
    if !path.exists() {
        onscreen_warn!("{} not found, using default elevator settings.", path.display());
        return Ok(ElevatorSettings::default());
    }
    read_ron(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::room_configuration::{MasterConfiguration, RoomConfiguration};
    use crate::world::room_definition::RoomDefinition;

    #[test]
    fn template_survives_a_save() {
        let dir = tempfile::tempdir().unwrap();
        let template = GameManagerTemplate {
            config: Some(MasterConfiguration {
                room_configuration: Some(RoomConfiguration::new(vec![RoomDefinition::new("Lobby", "Scenes/Lobby")])),
                persistent_objects: vec!["Player".into()],
                preloaded_resource_paths: Vec::new(),
            }),
            blend_time: 3.5,
            blend_material: Default::default(),
        };

        save_ron(&dir.path().join(MASTER_CONFIG_RON), &template).unwrap();
        let loaded = load_game_template(dir.path()).unwrap();

        assert_eq!(loaded.blend_time, 3.5);
        let config = loaded.config.unwrap();
        assert_eq!(config.persistent_objects, vec!["Player".to_string()]);
        assert_eq!(config.validate().unwrap().rooms[0].scene_path, "Scenes/Lobby");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_scene_catalog(dir.path()).unwrap_err();
        assert!(matches!(err, AscentError::Io { .. }));
    }

    #[test]
    fn broken_ron_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SCENES_RON);
        fs::write(&path, "(scenes: [").unwrap();

        match load_scene_catalog(dir.path()) {
            Err(AscentError::Ron { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn elevator_settings_default_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_elevator_settings(dir.path()).unwrap();
        assert_eq!(settings.movement_speed, DEFAULT_MOVEMENT_SPEED);
    }

    #[test]
    fn toml_is_read() {
        #[derive(serde::Deserialize)]
        struct Probe {
            level: String,
        }

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_TOML);
        fs::write(&path, "level = \"debug\"\n").unwrap();

        let probe: Probe = read_toml(&path).unwrap();
        assert_eq!(probe.level, "debug");
    }
}
