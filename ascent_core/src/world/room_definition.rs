// ascent_core/src/world/room_definition.rs
use crate::constants::{DEFAULT_MAX_LASER_DISTANCE, DEFAULT_MAX_RETICLE_DISTANCE};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// The fixed set of room-specific elevator animation rigs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
pub enum ControllerKind {
    Basement,
    GearRoom,
    Greenhouse,
    Finale,
}

/// Authoring-time values copied into a live room animator controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerTemplate {
    pub kind: ControllerKind,
    /// Runtime animation controller bound to the elevator display.
    #[serde(default)]
    pub runtime_controller: String,
}

impl ControllerTemplate {
    pub fn new(kind: ControllerKind, runtime_controller: impl Into<String>) -> Self {
        Self {
            kind,
            runtime_controller: runtime_controller.into(),
        }
    }
}

/// Static description of one loadable room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoomDefinition {
    /// Human readable name of the room.
    pub name: String,
    /// Unique reference to the scene holding the room's content.
    pub scene_path: String,
    /// Elevator animation rig driven by this room's progress.
    pub animator_controller: Option<ControllerTemplate>,
    pub max_laser_distance: f32,
    pub max_reticle_distance: f32,
}

impl Default for RoomDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            scene_path: String::new(),
            animator_controller: None,
            max_laser_distance: DEFAULT_MAX_LASER_DISTANCE,
            max_reticle_distance: DEFAULT_MAX_RETICLE_DISTANCE,
        }
    }
}

impl RoomDefinition {
    pub fn new(name: impl Into<String>, scene_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scene_path: scene_path.into(),
            ..Default::default()
        }
    }

    pub fn with_controller(mut self, template: ControllerTemplate) -> Self {
        self.animator_controller = Some(template);
        self
    }

    /// Two definitions name the same room when they share a scene.
    pub fn same_room(&self, other: &RoomDefinition) -> bool {
        self.scene_path == other.scene_path
    }

    pub fn has_scene(&self) -> bool {
        !self.scene_path.trim().is_empty()
    }
}

impl PartialEq for RoomDefinition {
    fn eq(&self, other: &Self) -> bool {
        self.same_room(other)
    }
}
