// ascent_core/src/rooms/mod.rs
use crate::rooms::basement::BasementRoomManager;
use crate::rooms::finale::{FinaleRoomManager, FinaleTiming, InstrumentRequirement};
use crate::rooms::gear_room::GearRoomManager;
use crate::rooms::greenhouse::GreenhouseRoomManager;
use crate::rooms::lobby::LobbyRoomManager;
use crate::rooms::pass_through::PassThroughRoom;
use crate::world::room_manager::{RoomBase, RoomManager};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Expands the accessors every room manager implements the same way.
/// The type must keep its shared state in a field called `base`.
macro_rules! room_manager_common {
    () => {
        fn base(&self) -> &$crate::world::room_manager::RoomBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut $crate::world::room_manager::RoomBase {
            &mut self.base
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    };
}

pub mod basement;
pub mod finale;
pub mod gear_room;
pub mod greenhouse;
pub mod lobby;
pub mod pass_through;

/// Which room manager a scene carries, with its authored settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Display)]
pub enum RoomKind {
    Lobby {
        /// Length of the intro video on the lobby screen.
        screen_clip_length: f32,
    },
    Basement {
        #[serde(default = "default_required_generators")]
        required_generators: usize,
    },
    GearRoom {
        #[serde(default)]
        objectives: Vec<String>,
        #[serde(default)]
        pulled_lever: Option<String>,
        #[serde(default)]
        cranked_crank: Option<String>,
    },
    Greenhouse,
    Finale {
        #[serde(default)]
        requirements: Vec<InstrumentRequirement>,
        #[serde(default)]
        timing: FinaleTiming,
    },
    /// Aesthetic shaft the elevator never stops in.
    PassThrough,
}

fn default_required_generators() -> usize {
    crate::constants::BASEMENT_REQUIRED_GENERATORS
}

/// Builds the room manager a scene of `kind` carries.
pub fn build_room(kind: &RoomKind, base: RoomBase) -> Box<dyn RoomManager> {
    match kind {
        RoomKind::Lobby { screen_clip_length } => {
            Box::new(LobbyRoomManager::new(base, *screen_clip_length))
        }
        RoomKind::Basement { required_generators } => {
            Box::new(BasementRoomManager::new(base, *required_generators))
        }
        RoomKind::GearRoom { objectives, pulled_lever, cranked_crank } => Box::new(
            GearRoomManager::new(base, objectives.clone())
                .with_progress_objectives(pulled_lever.clone(), cranked_crank.clone()),
        ),
        RoomKind::Greenhouse => Box::new(GreenhouseRoomManager::new(base)),
        RoomKind::Finale { requirements, timing } => {
            Box::new(FinaleRoomManager::new(base, requirements.clone(), *timing))
        }
        RoomKind::PassThrough => Box::new(PassThroughRoom::new(base)),
    }
}
