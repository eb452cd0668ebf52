// ascent_core/src/rooms/greenhouse.rs
use crate::world::room_manager::{RoomBase, RoomManager, RoomProgress};
use crate::world::room_state::RoomState;

const VO_WELCOME: &str = "welcomegreenhouse_2";
const VO_TURN_HANDLE: &str = "turnhandle";

/// Completed explicitly by the greenhouse puzzle.
pub struct GreenhouseRoomManager {
    base: RoomBase,
    completed: bool,
    progress: i32,
    shaft_sounds: bool,
}

impl GreenhouseRoomManager {
    pub fn new(base: RoomBase) -> Self {
        Self {
            base,
            completed: false,
            progress: 0,
            shaft_sounds: false,
        }
    }

    /// Finishes the room and starts the shaft ambience.
    pub fn complete(&mut self) {
        self.shaft_sounds = true;
        self.completed = true;
    }

    pub fn set_progress(&mut self, progress: i32) {
        self.progress = progress;
    }

    pub fn shaft_sounds_active(&self) -> bool {
        self.shaft_sounds
    }
}

impl RoomManager for GreenhouseRoomManager {
    room_manager_common!();

    fn state(&self) -> RoomState {
        if self.completed { RoomState::Complete } else { RoomState::Incomplete }
    }

    fn in_room(&mut self) {
        self.base.voice_over.add_event(VO_WELCOME);
        self.base.voice_over.add_event(VO_TURN_HANDLE);
    }

    fn progress(&self) -> RoomProgress {
        RoomProgress::Greenhouse(self.progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::room_manager::ElevatorPlanes;

    #[test]
    fn completes_on_request() {
        let mut room = GreenhouseRoomManager::new(RoomBase::new("Greenhouse", 0.0, ElevatorPlanes::default()));
        room.set_progress(4);
        assert_eq!(room.state(), RoomState::Incomplete);
        assert_eq!(room.progress(), RoomProgress::Greenhouse(4));

        room.complete();
        assert_eq!(room.state(), RoomState::Complete);
        assert!(room.shaft_sounds_active());
    }
}
