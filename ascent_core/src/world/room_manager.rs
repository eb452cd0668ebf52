// ascent_core/src/world/room_manager.rs
use crate::audio::voice_over::VoiceOverSequencer;
use crate::world::room_state::RoomState;
use glam::Vec4;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Absolute Y landmarks of a room's slice of the elevator shaft.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ElevatorPlanes {
    /// Bottom of the shaft, joined to the previous room.
    pub bottom: f32,
    /// Floor the elevator stops at.
    pub floor: f32,
    /// Crossing this plane starts the lighting transition into the next room.
    pub ceiling: f32,
    /// Top of the shaft, joined to the next room.
    pub top: f32,
}

impl ElevatorPlanes {
    pub fn new(bottom: f32, floor: f32, ceiling: f32, top: f32) -> Self {
        Self { bottom, floor, ceiling, top }
    }

    fn shift(&mut self, dy: f32) {
        self.bottom += dy;
        self.floor += dy;
        self.ceiling += dy;
        self.top += dy;
    }
}

/// What the elevator tells rooms about itself every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElevatorProbe {
    pub y: f32,
    /// Whether the elevator transform is moving, not the animator flag.
    pub moving: bool,
    pub rounding_threshold: f32,
}

/// Puzzle progress surfaced to the room-specific elevator animators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomProgress {
    #[default]
    None,
    /// Running basement generators.
    Generators(i32),
    GearObjectives { pulled_lever: bool, cranked_crank: bool },
    Greenhouse(i32),
    Finale(i32),
}

/// State every room manager shares.
#[derive(Debug, Clone)]
pub struct RoomBase {
    pub name: String,
    /// Y of the room's root transform. The planes move with it.
    pub origin_y: f32,
    pub planes: ElevatorPlanes,
    pub camera_clear_color: Vec4,
    pub pedestal_texture: Option<String>,
    pub voice_over: VoiceOverSequencer,
    entered: bool,
    active: bool,
}

impl RoomBase {
    pub fn new(name: impl Into<String>, origin_y: f32, planes: ElevatorPlanes) -> Self {
        Self {
            name: name.into(),
            origin_y,
            planes,
            camera_clear_color: Vec4::ONE,
            pedestal_texture: None,
            voice_over: VoiceOverSequencer::default(),
            entered: false,
            active: true,
        }
    }

    pub fn with_clear_color(mut self, color: Vec4) -> Self {
        self.camera_clear_color = color;
        self
    }

    pub fn with_pedestal_texture(mut self, texture: Option<String>) -> Self {
        self.pedestal_texture = texture;
        self
    }

    pub fn with_voice_over(mut self, voice_over: VoiceOverSequencer) -> Self {
        self.voice_over = voice_over;
        self
    }

    /// Moves the room's root to `y`, carrying the planes along.
    pub fn move_origin_to(&mut self, y: f32) {
        let dy = y - self.origin_y;
        self.origin_y = y;
        self.planes.shift(dy);
    }

    /// Whether the room-entry hook has already fired.
    pub fn has_entered(&self) -> bool {
        self.entered
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Stationary and within rounding distance of this room's floor.
    pub fn elevator_at_floor(&self, probe: &ElevatorProbe) -> bool {
        !probe.moving && (probe.y - self.planes.floor).abs() < probe.rounding_threshold
    }
}

/// A room's controller, as seen by the elevator and the game manager.
///
/// `state` must be a pure read of the room's own puzzle state. Nothing in
/// the core looks past it, `progress` and `experience_complete`.
pub trait RoomManager: Any {
    fn state(&self) -> RoomState;

    fn base(&self) -> &RoomBase;

    fn base_mut(&mut self) -> &mut RoomBase;

    fn name(&self) -> &str {
        &self.base().name
    }

    /// Fired once, when the elevator first settles on this room's floor.
    fn in_room(&mut self) {}

    fn update(&mut self, _dt: f32, _probe: &ElevatorProbe) {}

    fn progress(&self) -> RoomProgress {
        RoomProgress::None
    }

    /// Set by the last room once its closing sequence has played out.
    fn experience_complete(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Runs the room-entry check. Returns true on the frame `in_room` fired.
pub fn detect_entry(room: &mut dyn RoomManager, probe: &ElevatorProbe) -> bool {
    if room.base().entered || !room.base().elevator_at_floor(probe) {
        return false;
    }
    room.base_mut().entered = true;
    room.in_room();
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        base: RoomBase,
        entries: u32,
    }

    impl RoomManager for Counter {
        fn state(&self) -> RoomState {
            RoomState::Incomplete
        }
        fn base(&self) -> &RoomBase {
            &self.base
        }
        fn base_mut(&mut self) -> &mut RoomBase {
            &mut self.base
        }
        fn in_room(&mut self) {
            self.entries += 1;
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    fn counter() -> Counter {
        Counter {
            base: RoomBase::new("Counter", 0.0, ElevatorPlanes::new(-2.0, 0.0, 3.0, 5.0)),
            entries: 0,
        }
    }

    fn probe(y: f32, moving: bool) -> ElevatorProbe {
        ElevatorProbe { y, moving, rounding_threshold: 0.0001 }
    }

    #[test]
    fn moving_origin_carries_planes() {
        let mut base = RoomBase::new("Shaft", 10.0, ElevatorPlanes::new(8.0, 10.0, 13.0, 15.0));
        base.move_origin_to(25.0);

        assert_eq!(base.origin_y, 25.0);
        assert_eq!(base.planes, ElevatorPlanes::new(23.0, 25.0, 28.0, 30.0));
    }

    #[test]
    fn entry_hook_fires_exactly_once() {
        let mut room = counter();

        assert!(!detect_entry(&mut room, &probe(-1.0, true)));
        // At the floor, but still moving
        assert!(!detect_entry(&mut room, &probe(0.0, true)));
        assert!(detect_entry(&mut room, &probe(0.0, false)));
        assert!(!detect_entry(&mut room, &probe(0.0, false)));

        assert_eq!(room.entries, 1);
        assert!(room.base().has_entered());
    }

    #[test]
    fn entry_needs_rounding_distance() {
        let mut room = counter();
        assert!(!detect_entry(&mut room, &probe(0.001, false)));
        assert_eq!(room.entries, 0);
    }
}
