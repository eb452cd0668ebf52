// ascent_core/src/world/room_state.rs
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Completion state every room manager reports to the elevator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter)]
pub enum RoomState {
    /// The elevator stops and waits for the room to be completed.
    #[default]
    Incomplete,
    /// The room is done; the elevator moves or waits for the lever.
    Complete,
    /// Aesthetic-only room; the elevator passes straight through.
    Skip,
}

impl RoomState {
    /// Whether the elevator may leave a room in this state.
    pub fn allows_departure(&self) -> bool {
        !matches!(self, RoomState::Incomplete)
    }
}
