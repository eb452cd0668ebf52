// ascent_game/src/main.rs
use ascent_core::constants::{LOG_BASENAME, SETTINGS_TOML};
use ascent_core::error::AscentResult;
use ascent_core::logging::logging::init_file_logger;
use ascent_core::onscreen_error;
use ascent_core::storage::core_storage::{load_elevator_settings, load_game_template, load_scene_catalog};
use ascent_game_lib::kiosk::Kiosk;
use ascent_game_lib::settings::Settings;
use std::path::PathBuf;
use std::{env, process};

fn main() {
    if let Err(e) = run() {
        onscreen_error!("{e}");
        process::exit(1);
    }
}

fn run() -> AscentResult<()> {
    // Optional path to the settings file
    let args: Vec<String> = env::args().collect();
    let settings_path = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(SETTINGS_TOML));

    let settings = Settings::load(&settings_path)?;
    let _logger = init_file_logger(&settings.log_level, LOG_BASENAME)?;

    let data_dir = settings.data_dir();
    log::info!("Loading game data from {}", data_dir.display());
    let template = load_game_template(&data_dir)?;
    let catalog = load_scene_catalog(&data_dir)?;
    let elevator = load_elevator_settings(&data_dir)?;

    if let Some(config) = template.config.as_ref() {
        for path in &config.preloaded_resource_paths {
            log::info!("Preloading {path}");
        }
    }

    let mut kiosk = Kiosk::new(settings, template, catalog, elevator)?;
    kiosk.run()
}
