// ascent_core/src/rooms/pass_through.rs
use crate::world::room_manager::{RoomBase, RoomManager};
use crate::world::room_state::RoomState;

/// Stretch of shaft with nothing to do. The elevator never stops here.
pub struct PassThroughRoom {
    base: RoomBase,
}

impl PassThroughRoom {
    pub fn new(base: RoomBase) -> Self {
        Self { base }
    }
}

impl RoomManager for PassThroughRoom {
    room_manager_common!();

    fn state(&self) -> RoomState {
        RoomState::Skip
    }
}
