// ascent_game/src/autopilot.rs
use crate::settings::AutopilotSettings;
use ascent_core::elevator::elevator::ElevatorPhase;
use ascent_core::game::game::Game;
use ascent_core::rooms::basement::BasementRoomManager;
use ascent_core::rooms::finale::FinaleRoomManager;
use ascent_core::rooms::gear_room::GearRoomManager;
use ascent_core::rooms::greenhouse::GreenhouseRoomManager;
use ascent_core::rooms::lobby::LobbyRoomManager;
use ascent_core::world::room_manager::RoomManager;
use ascent_core::world::room_state::RoomState;

/// Stands in for a visitor: solves each room after a pause, then rides on.
pub struct Autopilot {
    settings: AutopilotSettings,
    /// Scene of the room being played.
    room: Option<String>,
    elapsed: f32,
    solved: bool,
    presses: u32,
}

impl Autopilot {
    pub fn new(settings: AutopilotSettings) -> Self {
        Self {
            settings,
            room: None,
            elapsed: 0.0,
            solved: false,
            presses: 0,
        }
    }

    /// Button presses made so far.
    pub fn presses(&self) -> u32 {
        self.presses
    }

    pub fn update(&mut self, game: &mut Game, dt: f32) {
        let Some(manager) = game.manager_mut() else {
            return;
        };

        let scene = match (manager.current_room_manager(), manager.current_room()) {
            (Some(_), Some(room)) => room.scene_path.clone(),
            _ => return,
        };
        if self.room.as_deref() != Some(scene.as_str()) {
            log::debug!("Autopilot entered {scene}");
            self.room = Some(scene);
            self.elapsed = 0.0;
            self.solved = false;
        }
        self.elapsed += dt;

        if !self.solved && self.elapsed >= self.settings.solve_delay {
            if let Some(room) = manager.current_room_manager_mut() {
                solve_room(room);
            }
            self.solved = true;
        }

        let complete = manager
            .current_room_manager()
            .is_some_and(|room| room.state() == RoomState::Complete);
        let ready = self.solved && self.elapsed >= self.settings.solve_delay + self.settings.press_delay;

        if ready && complete && game.elevator.phase() == ElevatorPhase::Idle && game.press_button() {
            self.presses += 1;
            log::info!("Autopilot pressed the elevator button");
        }
    }
}

/// Plays a room's puzzle through. Rooms without a puzzle are left alone.
pub fn solve_room(room: &mut dyn RoomManager) {
    let name = room.name().to_string();
    let any = room.as_any_mut();

    if let Some(lobby) = any.downcast_mut::<LobbyRoomManager>() {
        lobby.press_screen();
    } else if let Some(basement) = any.downcast_mut::<BasementRoomManager>() {
        for generator in 0..basement.required_generators() {
            basement.generator_turned_on(&format!("generator_{generator}"));
        }
    } else if let Some(gear_room) = any.downcast_mut::<GearRoomManager>() {
        let objectives: Vec<String> = gear_room.objectives().iter().map(|o| o.name.clone()).collect();
        for objective in objectives {
            gear_room.set_objective(&objective, true);
        }
    } else if let Some(greenhouse) = any.downcast_mut::<GreenhouseRoomManager>() {
        greenhouse.complete();
    } else if let Some(finale) = any.downcast_mut::<FinaleRoomManager>() {
        let plays: Vec<(String, u32)> = finale
            .requirements()
            .iter()
            .map(|r| (r.group.clone(), r.required_plays))
            .collect();
        for (group, required) in plays {
            for _ in 0..required {
                finale.record_unique_play(&group);
            }
        }
    } else {
        log::debug!("Autopilot has nothing to solve in {name}");
        return;
    }

    log::info!("Autopilot solved {name}");
}
