// ascent_core/src/rooms/gear_room.rs
use crate::world::room_manager::{ElevatorProbe, RoomBase, RoomManager, RoomProgress};
use crate::world::room_state::RoomState;

const VO_INTRO: &str = "08_BOILERROOM_intro_1";
const VO_DOOR_OPENED: &str = "08_BOILERROOM_2ndcrank_1";
const VO_PULL_LEVER: &str = "pulllever";
const VO_LEVER_PULLED: &str = "05_lobbyBot_dry_VO1_B__boilerroom_v2";

/// One named puzzle step in the gear room.
#[derive(Debug, Clone, PartialEq)]
pub struct GearRoomObjective {
    pub name: String,
    pub complete: bool,
}

/// Completes once every objective is met. Objectives can be undone, so the
/// room also counts how often it became complete and fell back again.
pub struct GearRoomManager {
    base: RoomBase,
    objectives: Vec<GearRoomObjective>,
    pulled_lever: Option<String>,
    cranked_crank: Option<String>,
    last_state: RoomState,
    completions: u32,
    reverse_completions: u32,
}

impl GearRoomManager {
    pub fn new(base: RoomBase, objectives: Vec<String>) -> Self {
        Self {
            base,
            objectives: objectives
                .into_iter()
                .map(|name| GearRoomObjective { name, complete: false })
                .collect(),
            pulled_lever: None,
            cranked_crank: None,
            last_state: RoomState::Incomplete,
            completions: 0,
            reverse_completions: 0,
        }
    }

    /// Names the objectives shown on the elevator display.
    pub fn with_progress_objectives(mut self, pulled_lever: Option<String>, cranked_crank: Option<String>) -> Self {
        self.pulled_lever = pulled_lever;
        self.cranked_crank = cranked_crank;
        self
    }

    pub fn objectives(&self) -> &[GearRoomObjective] {
        &self.objectives
    }

    /// Marks an objective done or undone. Unknown names are ignored.
    pub fn set_objective(&mut self, name: &str, complete: bool) {
        let Some(objective) = self.objectives.iter_mut().find(|o| o.name == name) else {
            log::debug!("Gear room has no objective called {name}");
            return;
        };
        let newly_complete = complete && !objective.complete;
        objective.complete = complete;
        if newly_complete {
            self.objective_completed(name);
        }
    }

    /// Voice-over routing for finished puzzle steps.
    pub fn objective_completed(&mut self, name: &str) {
        match name {
            "DoorOpened" => {
                self.base.voice_over.add_event(VO_DOOR_OPENED);
            }
            "CrankObjective" => {
                self.base.voice_over.replace_event(VO_PULL_LEVER);
            }
            "LeverObjective" => {
                self.base.voice_over.replace_event(VO_LEVER_PULLED);
            }
            _ => {}
        }
    }

    fn is_objective_complete(&self, name: Option<&str>) -> bool {
        name.is_some_and(|name| self.objectives.iter().any(|o| o.name == name && o.complete))
    }

    pub fn pulled_lever(&self) -> bool {
        self.is_objective_complete(self.pulled_lever.as_deref())
    }

    pub fn cranked_crank(&self) -> bool {
        self.is_objective_complete(self.cranked_crank.as_deref())
    }

    pub fn completed_objective_count(&self) -> usize {
        self.objectives.iter().filter(|o| o.complete).count()
    }

    pub fn objectives_left(&self) -> usize {
        self.objectives.len() - self.completed_objective_count()
    }

    pub fn completions(&self) -> u32 {
        self.completions
    }

    pub fn reverse_completions(&self) -> u32 {
        self.reverse_completions
    }
}

impl RoomManager for GearRoomManager {
    room_manager_common!();

    fn state(&self) -> RoomState {
        if self.objectives.iter().all(|o| o.complete) {
            RoomState::Complete
        } else {
            RoomState::Incomplete
        }
    }

    fn in_room(&mut self) {
        self.base.voice_over.add_event(VO_INTRO);
    }

    fn update(&mut self, _dt: f32, _probe: &ElevatorProbe) {
        let current = self.state();
        match (self.last_state, current) {
            (RoomState::Incomplete, RoomState::Complete) => {
                log::info!("Gear room objectives complete");
                self.completions += 1;
            }
            (RoomState::Complete, RoomState::Incomplete) => {
                log::info!("Gear room objectives no longer complete");
                self.reverse_completions += 1;
            }
            _ => {}
        }
        self.last_state = current;
    }

    fn progress(&self) -> RoomProgress {
        RoomProgress::GearObjectives {
            pulled_lever: self.pulled_lever(),
            cranked_crank: self.cranked_crank(),
        }
    }
}
