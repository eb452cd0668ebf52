// ascent_core/src/elevator/elevator.rs
use crate::animation::animator::Animator;
use crate::animation::curve::AnimationCurve;
use crate::constants::*;
use crate::elevator::room_animator::RoomAnimatorSlot;
use crate::game::game_manager::GameManager;
use crate::world::room_definition::RoomDefinition;
use crate::world::room_manager::ElevatorProbe;
use crate::world::room_state::RoomState;
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// What the elevator is doing this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ElevatorPhase {
    /// Parked on the current room's floor.
    Idle,
    /// Left the room; the next one is still loading.
    AwaitingLoad,
    /// Cruising on the velocity curve.
    Ascending,
    /// Inside stopping distance of the destination floor.
    Decelerating,
}

/// Authored motion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevatorSettings {
    pub movement_speed: f32,
    /// Velocity over seconds since the elevator set off.
    pub velocity_curve: AnimationCurve,
    /// Velocity over normalized distance left to the floor.
    pub stopping_curve: AnimationCurve,
    pub rounding_threshold: f32,
}

impl Default for ElevatorSettings {
    fn default() -> Self {
        Self {
            movement_speed: DEFAULT_MOVEMENT_SPEED,
            velocity_curve: AnimationCurve::linear(&[(0.0, 0.0), (1.5, 1.0)]),
            stopping_curve: AnimationCurve::linear(&[(0.0, 0.1), (1.0, 1.0)]),
            rounding_threshold: DEFAULT_ROUNDING_THRESHOLD,
        }
    }
}

/// Controller pointer reach, set per room.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaserPointer {
    pub max_laser_distance: f32,
    pub max_reticle_distance: f32,
}

impl Default for LaserPointer {
    fn default() -> Self {
        Self {
            max_laser_distance: DEFAULT_MAX_LASER_DISTANCE,
            max_reticle_distance: DEFAULT_MAX_RETICLE_DISTANCE,
        }
    }
}

impl LaserPointer {
    fn follow(&mut self, room: &RoomDefinition) {
        self.max_laser_distance = room.max_laser_distance;
        self.max_reticle_distance = room.max_reticle_distance;
    }
}

/// The rig carrying the player from room to room.
pub struct Elevator {
    settings: ElevatorSettings,
    y: f32,
    phase: ElevatorPhase,
    button_pressed: bool,
    /// Whether the transform moves, as opposed to the animator flag.
    moving: bool,
    movement_timer: f32,
    lever_on: bool,
    animator: Animator,
    room_animator: RoomAnimatorSlot,
    laser_pointer: LaserPointer,
}

impl Elevator {
    /// A new elevator settles onto whatever floor it starts at before it
    /// counts as idle.
    pub fn new(settings: ElevatorSettings, y: f32) -> Self {
        Self {
            settings,
            y,
            phase: ElevatorPhase::Decelerating,
            button_pressed: false,
            moving: false,
            movement_timer: 0.0,
            lever_on: false,
            animator: Animator::new(),
            room_animator: RoomAnimatorSlot::new(),
            laser_pointer: LaserPointer::default(),
        }
    }

    pub fn update(&mut self, manager: &mut GameManager, dt: f32) {
        if let Some(room) = manager.current_room() {
            self.laser_pointer.follow(room);
        }

        match manager.current_room_manager().map(|room| (room.state(), room.base().planes.floor)) {
            None => self.ascend_between_rooms(manager, dt),
            Some((state, _)) if state.allows_departure() && (self.button_pressed || state == RoomState::Skip) => {
                self.depart(manager, state, dt);
            }
            Some((state, floor)) => {
                if floor - self.y > self.settings.rounding_threshold {
                    self.approach(manager, floor, dt);
                } else {
                    self.arrive(manager, floor, state);
                }
            }
        }

        self.room_animator.update(manager.loaded_room_managers());
    }

    /// Honoured only while parked at a complete room, and only once.
    pub fn press_button(&mut self, manager: &GameManager) -> bool {
        let room_complete = manager
            .current_room_manager()
            .is_none_or(|room| room.state() == RoomState::Complete);

        if self.phase == ElevatorPhase::Idle && !self.button_pressed && room_complete {
            self.button_pressed = true;
            return true;
        }
        false
    }

    /// Speed `distance` away from the destination floor. Inside the stopping
    /// curve's time span the stopping curve takes over from the velocity curve.
    pub fn approach_speed(&self, distance: f32) -> f32 {
        let stopping_time = self.settings.stopping_curve.max_time();
        if distance < stopping_time {
            self.settings.movement_speed * self.settings.stopping_curve.evaluate(distance / stopping_time)
        } else {
            self.settings.movement_speed * self.settings.velocity_curve.evaluate(self.movement_timer)
        }
    }

    fn depart(&mut self, manager: &mut GameManager, state: RoomState, dt: f32) {
        let mut velocity = self.settings.velocity_curve.evaluate(self.movement_timer);
        if velocity < VELOCITY_CLIP {
            velocity = 0.0;
        }

        self.y += self.settings.movement_speed * velocity * dt;
        self.animator.set_bool(ANIM_PROP_MOVING, true);
        self.moving = velocity != 0.0;
        self.lever_on = false;
        self.movement_timer += dt;
        self.button_pressed = false;
        self.phase = ElevatorPhase::Ascending;

        if state == RoomState::Skip {
            manager.unload_previous_room();
        }
        self.load_next_room(manager);
    }

    /// Asks for the room after the current one and heads for it.
    fn load_next_room(&mut self, manager: &mut GameManager) {
        let next_room = manager
            .room_configuration()
            .and_then(|rooms| rooms.next_room(manager.current_room()))
            .cloned();
        let Some(next_room) = next_room else {
            log::error!("No next room to load");
            return;
        };

        match manager.load_room(&next_room) {
            Ok(()) => self.phase = ElevatorPhase::AwaitingLoad,
            Err(e) => log::error!("Could not load {}: {e}", next_room.name),
        }
        self.room_animator.attach(Some(&next_room));
    }

    fn ascend_between_rooms(&mut self, manager: &mut GameManager, dt: f32) {
        if self.phase == ElevatorPhase::Idle && self.button_pressed {
            // Parked after a failed load: carry on with the room after it
            self.button_pressed = false;
            self.load_next_room(manager);
            return;
        }
        if self.phase != ElevatorPhase::AwaitingLoad {
            return;
        }
        if !manager.is_loading() {
            log::warn!("Room load finished without a room manager, stopping the elevator");
            self.stop();
            self.phase = ElevatorPhase::Idle;
            return;
        }

        // The next room is stacked on the previous top, so its floor lies above it
        let ceiling = manager
            .previous_room_manager()
            .map_or(f32::INFINITY, |room| room.base().planes.top);
        let speed = self.settings.movement_speed * self.settings.velocity_curve.evaluate(self.movement_timer);
        self.y = (self.y + speed * dt).min(ceiling).max(self.y);
        self.set_moving();
        self.movement_timer += dt;
    }

    fn approach(&mut self, manager: &mut GameManager, floor: f32, dt: f32) {
        let past_ceiling = manager
            .previous_room_manager()
            .is_some_and(|room| self.y >= room.base().planes.ceiling);
        if past_ceiling {
            manager.start_lighting_transition();
        }

        let distance = floor - self.y;
        self.phase = if distance < self.settings.stopping_curve.max_time() {
            ElevatorPhase::Decelerating
        } else {
            ElevatorPhase::Ascending
        };

        let speed = self.approach_speed(distance);
        // Never step past the floor; the next frame snaps onto it
        self.y = (self.y + speed * dt).min(floor);
        self.set_moving();
        self.movement_timer += dt;
    }

    fn arrive(&mut self, manager: &mut GameManager, floor: f32, state: RoomState) {
        self.y = floor;
        self.stop();
        self.lever_on = state == RoomState::Complete;

        if self.phase != ElevatorPhase::Idle {
            self.phase = ElevatorPhase::Idle;
            manager.unload_previous_room();
            self.room_animator.attach(manager.current_room());
        }
    }

    fn set_moving(&mut self) {
        self.animator.set_bool(ANIM_PROP_MOVING, true);
        self.moving = true;
        self.lever_on = false;
    }

    fn stop(&mut self) {
        self.animator.set_bool(ANIM_PROP_MOVING, false);
        self.moving = false;
        self.movement_timer = 0.0;
    }

    pub fn probe(&self) -> ElevatorProbe {
        ElevatorProbe {
            y: self.y,
            moving: self.moving,
            rounding_threshold: self.settings.rounding_threshold,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn phase(&self) -> ElevatorPhase {
        self.phase
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn is_button_pressed(&self) -> bool {
        self.button_pressed
    }

    /// Light on the up lever; lit while parked at a complete room.
    pub fn lever_on(&self) -> bool {
        self.lever_on
    }

    pub fn settings(&self) -> &ElevatorSettings {
        &self.settings
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn room_animator(&self) -> &RoomAnimatorSlot {
        &self.room_animator
    }

    pub fn laser_pointer(&self) -> LaserPointer {
        self.laser_pointer
    }
}
