// ascent_core/src/game/game.rs
use crate::elevator::elevator::{Elevator, ElevatorSettings};
use crate::error::AscentResult;
use crate::game::game_manager::{GameManager, GameManagerTemplate};
use crate::scene::loader::SceneLoader;
use glam::Vec3;
use std::rc::Rc;

/// Everything one kiosk session runs: the room orchestrator and the
/// elevator carrying the player through it.
pub struct Game {
    manager: Option<GameManager>,
    pub elevator: Elevator,
}

impl Game {
    pub fn new(settings: ElevatorSettings, elevator_y: f32) -> Self {
        Self {
            manager: None,
            elevator: Elevator::new(settings, elevator_y),
        }
    }

    /// Creates the game manager unless it already exists.
    pub fn init(
        &mut self,
        template: &GameManagerTemplate,
        loader: Rc<dyn SceneLoader>,
        origin: Vec3,
    ) -> AscentResult<&mut GameManager> {
        GameManager::init(&mut self.manager, template, loader, origin)
    }

    /// One frame. The elevator moves first, then the rooms see where it is.
    pub fn frame(&mut self, dt: f32) {
        let Some(manager) = self.manager.as_mut() else {
            return;
        };

        self.elevator.update(manager, dt);
        manager.update(dt, &self.elevator.probe());
    }

    /// Presses the elevator's up button.
    pub fn press_button(&mut self) -> bool {
        match self.manager.as_ref() {
            Some(manager) => self.elevator.press_button(manager),
            None => false,
        }
    }

    pub fn manager(&self) -> Option<&GameManager> {
        self.manager.as_ref()
    }

    pub fn manager_mut(&mut self) -> Option<&mut GameManager> {
        self.manager.as_mut()
    }
}
