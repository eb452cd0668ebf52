// ascent_core/src/rooms/basement.rs
use crate::world::room_manager::{RoomBase, RoomManager, RoomProgress};
use crate::world::room_state::RoomState;
use std::collections::HashSet;

const VO_INTRO: &str = "02_lobbyBot_dry_VO1_A_generator_v2";
const VO_FIRST_GENERATOR: &str = "02_lobbyBot_dry_VO1_B__generator_v2";
const VO_ALL_GENERATORS: &str = "02_lobbyBot_dry_VO1_C__generator_v2";
const VO_TWO_LEFT: &str = "twomore_plugs";
const VO_ONE_LEFT: &str = "onemore_plug";

/// Completes once enough distinct generators are running.
pub struct BasementRoomManager {
    base: RoomBase,
    completed_generators: HashSet<String>,
    required_generators: usize,
    any_started: bool,
}

impl BasementRoomManager {
    pub fn new(base: RoomBase, required_generators: usize) -> Self {
        Self {
            base,
            completed_generators: HashSet::new(),
            required_generators,
            any_started: false,
        }
    }

    pub fn completed_generator_count(&self) -> usize {
        self.completed_generators.len()
    }

    pub fn required_generators(&self) -> usize {
        self.required_generators
    }

    /// Called by a generator when it is plugged in. Repeats are ignored for
    /// progress but still count as the player having started.
    pub fn generator_turned_on(&mut self, generator: &str) {
        if self.completed_generators.insert(generator.to_string()) {
            let count = self.completed_generators.len();
            if count >= self.required_generators {
                log::info!("All {count} basement generators are running");
                self.base.voice_over.replace_event(VO_ALL_GENERATORS);
            }

            match self.required_generators.saturating_sub(count) {
                2 => {
                    self.base.voice_over.add_event(VO_TWO_LEFT);
                }
                1 => {
                    self.base.voice_over.replace_event(VO_ONE_LEFT);
                }
                _ => {}
            }
        }

        if !self.any_started {
            self.any_started = true;
            self.base.voice_over.add_event(VO_FIRST_GENERATOR);
        }
    }
}

impl RoomManager for BasementRoomManager {
    room_manager_common!();

    fn state(&self) -> RoomState {
        if self.completed_generators.len() >= self.required_generators {
            RoomState::Complete
        } else {
            RoomState::Incomplete
        }
    }

    fn in_room(&mut self) {
        self.base.voice_over.add_event(VO_INTRO);
    }

    fn progress(&self) -> RoomProgress {
        RoomProgress::Generators(self.completed_generators.len() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::voice_over::{VoiceOverEvent, VoiceOverSequencer};
    use crate::world::room_manager::ElevatorPlanes;

    fn basement() -> BasementRoomManager {
        let voice_over = VoiceOverSequencer::new(
            [VO_INTRO, VO_FIRST_GENERATOR, VO_ALL_GENERATORS, VO_TWO_LEFT, VO_ONE_LEFT]
                .iter()
                .map(|clip| VoiceOverEvent::new(*clip, 1.0))
                .collect(),
        );
        let base = RoomBase::new("Basement", 10.0, ElevatorPlanes::new(8.0, 10.0, 13.0, 15.0))
            .with_voice_over(voice_over);
        BasementRoomManager::new(base, 3)
    }

    #[test]
    fn needs_three_distinct_generators() {
        let mut room = basement();
        room.generator_turned_on("west");
        room.generator_turned_on("west");
        room.generator_turned_on("east");
        assert_eq!(room.state(), RoomState::Incomplete);
        assert_eq!(room.progress(), RoomProgress::Generators(2));

        room.generator_turned_on("north");
        assert_eq!(room.state(), RoomState::Complete);
        assert_eq!(room.completed_generator_count(), 3);
    }

    #[test]
    fn voice_over_tracks_generators_left() {
        let mut room = basement();
        room.generator_turned_on("west");
        assert!(room.base().voice_over.is_armed(VO_TWO_LEFT));
        assert!(room.base().voice_over.is_armed(VO_FIRST_GENERATOR));

        room.generator_turned_on("east");
        assert!(room.base().voice_over.is_armed(VO_ONE_LEFT));
        assert!(!room.base().voice_over.is_armed(VO_TWO_LEFT));

        room.generator_turned_on("north");
        assert!(room.base().voice_over.is_armed(VO_ALL_GENERATORS));
        assert!(!room.base().voice_over.is_armed(VO_ONE_LEFT));
    }

    #[test]
    fn entry_queues_intro() {
        let mut room = basement();
        room.in_room();
        assert!(room.base().voice_over.is_armed(VO_INTRO));
    }
}
