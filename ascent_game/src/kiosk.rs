// ascent_game/src/kiosk.rs
use crate::autopilot::Autopilot;
use crate::settings::Settings;
use ascent_core::constants::MAX_ACCUM;
use ascent_core::elevator::elevator::ElevatorSettings;
use ascent_core::error::{AscentError, AscentResult};
use ascent_core::game::game::Game;
use ascent_core::game::game_manager::GameManagerTemplate;
use ascent_core::rooms::RoomKind;
use ascent_core::scene::catalog_loader::CatalogSceneLoader;
use ascent_core::scene::layout::SceneCatalog;
use ascent_core::{onscreen_info, onscreen_warn};
use glam::Vec3;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Unattended installation loop: one session per visitor, restarting at the
/// first room whenever the experience was completed and the headset resumes.
pub struct Kiosk {
    settings: Settings,
    template: GameManagerTemplate,
    catalog: SceneCatalog,
    elevator: ElevatorSettings,
    game: Game,
    autopilot: Option<Autopilot>,
    frames: u64,
    sessions: u32,
}

impl Kiosk {
    pub fn new(
        settings: Settings,
        template: GameManagerTemplate,
        catalog: SceneCatalog,
        elevator: ElevatorSettings,
    ) -> AscentResult<Self> {
        let game = start_session(&settings, &template, &catalog, &elevator)?;
        let autopilot = settings
            .autopilot
            .enabled
            .then(|| Autopilot::new(settings.autopilot.clone()));

        Ok(Self {
            settings,
            template,
            catalog,
            elevator,
            game,
            autopilot,
            frames: 0,
            sessions: 1,
        })
    }

    /// Runs until the frame cap, or forever without one.
    pub fn run(&mut self) -> AscentResult<()> {
        let step = self.settings.step();
        let mut accumulator: f32 = 0.0;
        let mut last = Instant::now();

        while !self.finished() {
            let frame_dt = if self.settings.realtime {
                let now = Instant::now();
                let dt = now.duration_since(last).as_secs_f32();
                last = now;
                dt
            } else {
                step
            };
            accumulator = (accumulator + frame_dt).min(MAX_ACCUM);

            while accumulator >= step && !self.finished() {
                self.step(step)?;
                accumulator -= step;
            }

            if self.settings.realtime {
                std::thread::sleep(Duration::from_secs_f32(step));
            }
        }

        if let Some(manager) = self.game.manager_mut() {
            manager.on_application_quit();
        }
        onscreen_info!("Kiosk stopped after {} frames and {} sessions.", self.frames, self.sessions);
        Ok(())
    }

    /// One fixed step of the whole installation.
    pub fn step(&mut self, dt: f32) -> AscentResult<()> {
        if let Some(autopilot) = self.autopilot.as_mut() {
            autopilot.update(&mut self.game, dt);
        }
        self.game.frame(dt);
        self.frames += 1;

        let Some(manager) = self.game.manager_mut() else {
            return Ok(());
        };
        if manager.is_complete() {
            // Visitor takes the headset off and the next one puts it on
            manager.on_application_pause(true);
            manager.on_application_pause(false);
        }
        if manager.take_restart_request() {
            self.restart()?;
        }
        Ok(())
    }

    fn restart(&mut self) -> AscentResult<()> {
        if let Some(manager) = self.game.manager_mut() {
            manager.on_application_quit();
        }
        self.game = start_session(&self.settings, &self.template, &self.catalog, &self.elevator)?;
        if let Some(autopilot) = self.autopilot.as_mut() {
            *autopilot = Autopilot::new(self.settings.autopilot.clone());
        }
        self.sessions += 1;
        onscreen_info!("Starting session {}.", self.sessions);
        Ok(())
    }

    fn finished(&self) -> bool {
        self.settings.max_frames.is_some_and(|max| self.frames >= max)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Sessions started, including the current one.
    pub fn sessions(&self) -> u32 {
        self.sessions
    }
}

/// Builds a fresh game parked in the first room.
fn start_session(
    settings: &Settings,
    template: &GameManagerTemplate,
    catalog: &SceneCatalog,
    elevator: &ElevatorSettings,
) -> AscentResult<Game> {
    let first_room = template
        .config
        .as_ref()
        .ok_or(AscentError::MissingMasterConfiguration)?
        .validate()?
        .first_room()
        .cloned()
        .ok_or(AscentError::MissingFirstRoom)?;

    let layout = catalog
        .find(&first_room.scene_path)
        .ok_or_else(|| AscentError::UnknownScene(first_room.scene_path.clone()))?;
    if matches!(layout.kind, RoomKind::PassThrough) {
        onscreen_warn!("First room {} is a pass-through shaft.", first_room.name);
    }

    let floor = layout.planes.floor;
    let content = layout.instantiate();
    let loader = Rc::new(CatalogSceneLoader::new(catalog.clone(), settings.loader_latency_frames));

    let mut game = Game::new(elevator.clone(), floor);
    game.init(template, loader, Vec3::new(0.0, floor, 0.0))?
        .start_in_scene(&first_room.scene_path, content)?;
    Ok(game)
}
