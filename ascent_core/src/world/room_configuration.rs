// ascent_core/src/world/room_configuration.rs
use crate::error::{AscentError, AscentResult};
use crate::world::room_definition::RoomDefinition;
use serde::{Deserialize, Serialize};

/// Ordered room layout of the experience. Index zero is the first room.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RoomConfiguration {
    pub rooms: Vec<RoomDefinition>,
}

impl RoomConfiguration {
    pub fn new(rooms: Vec<RoomDefinition>) -> Self {
        Self { rooms }
    }

    pub fn first_room(&self) -> Option<&RoomDefinition> {
        self.rooms.first()
    }

    pub fn last_room(&self) -> Option<&RoomDefinition> {
        self.rooms.last()
    }

    fn index_of(&self, room: &RoomDefinition) -> Option<usize> {
        self.rooms.iter().position(|r| r.same_room(room))
    }

    /// The room after `current`. Wraps to the first room when `current` is
    /// the last one, unknown, or `None`.
    pub fn next_room(&self, current: Option<&RoomDefinition>) -> Option<&RoomDefinition> {
        let next = current
            .and_then(|room| self.index_of(room))
            .and_then(|i| self.rooms.get(i + 1));
        next.or_else(|| self.first_room())
    }

    /// The room before `current`. `None` yields the first room; the first
    /// or an unknown room yields the last one.
    pub fn previous_room(&self, current: Option<&RoomDefinition>) -> Option<&RoomDefinition> {
        let Some(current) = current else {
            return self.first_room();
        };
        match self.index_of(current) {
            Some(i) if i > 0 => self.rooms.get(i - 1),
            _ => self.last_room(),
        }
    }

    /// Resolves a loaded scene's path to the room authored for it.
    pub fn room_for_scene(&self, scene_path: &str) -> Option<&RoomDefinition> {
        self.rooms.iter().find(|room| {
            room.has_scene()
                && (scene_path.contains(room.scene_path.as_str())
                    || scene_path.eq_ignore_ascii_case(&room.scene_path))
        })
    }
}

/// Top level authored configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MasterConfiguration {
    pub room_configuration: Option<RoomConfiguration>,
    /// Objects created once at startup that survive every room transition.
    pub persistent_objects: Vec<String>,
    /// Resources the platform layer warms up before the first room.
    pub preloaded_resource_paths: Vec<String>,
}

impl MasterConfiguration {
    /// Fails with the configuration error that would stop startup.
    pub fn validate(&self) -> AscentResult<&RoomConfiguration> {
        let rooms = self
            .room_configuration
            .as_ref()
            .ok_or(AscentError::MissingRoomConfiguration)?;

        if rooms.first_room().is_none() {
            return Err(AscentError::MissingFirstRoom);
        }

        if let Some(room) = rooms.rooms.iter().find(|r| !r.has_scene()) {
            return Err(AscentError::EmptyScenePath(room.name.clone()));
        }

        Ok(rooms)
    }
}
