// ascent_core/src/elevator/room_animator.rs
use crate::animation::animator::Animator;
use crate::constants::{ANIM_PROP_CRANKED_CRANK, ANIM_PROP_PROGRESS, ANIM_PROP_PULLED_LEVER};
use crate::world::room_definition::{ControllerKind, ControllerTemplate, RoomDefinition};
use crate::world::room_manager::{RoomManager, RoomProgress};

/// Animator bound to the elevator display, rebound for one room's rig.
#[derive(Debug, Clone)]
pub struct RoomRig {
    runtime_controller: String,
    animator: Animator,
}

impl RoomRig {
    /// Copies the template values onto a fresh runtime animator.
    fn from_template(template: &ControllerTemplate) -> Self {
        let mut animator = Animator::new();
        animator.set_runtime_controller(template.runtime_controller.clone());
        animator.rebind();
        Self {
            runtime_controller: template.runtime_controller.clone(),
            animator,
        }
    }

    pub fn runtime_controller(&self) -> &str {
        &self.runtime_controller
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }
}

/// One of the fixed per-room elevator display rigs.
#[derive(Debug, Clone)]
pub enum RoomAnimatorController {
    Basement(RoomRig),
    GearRoom(RoomRig),
    Greenhouse(RoomRig),
    Finale(RoomRig),
}

impl RoomAnimatorController {
    pub fn from_template(template: &ControllerTemplate) -> Self {
        let rig = RoomRig::from_template(template);
        match template.kind {
            ControllerKind::Basement => RoomAnimatorController::Basement(rig),
            ControllerKind::GearRoom => RoomAnimatorController::GearRoom(rig),
            ControllerKind::Greenhouse => RoomAnimatorController::Greenhouse(rig),
            ControllerKind::Finale => RoomAnimatorController::Finale(rig),
        }
    }

    pub fn kind(&self) -> ControllerKind {
        match self {
            RoomAnimatorController::Basement(_) => ControllerKind::Basement,
            RoomAnimatorController::GearRoom(_) => ControllerKind::GearRoom,
            RoomAnimatorController::Greenhouse(_) => ControllerKind::Greenhouse,
            RoomAnimatorController::Finale(_) => ControllerKind::Finale,
        }
    }

    pub fn rig(&self) -> &RoomRig {
        match self {
            RoomAnimatorController::Basement(rig)
            | RoomAnimatorController::GearRoom(rig)
            | RoomAnimatorController::Greenhouse(rig)
            | RoomAnimatorController::Finale(rig) => rig,
        }
    }

    /// Pushes the progress of the newest loaded room this rig belongs to.
    pub fn update<'a>(&mut self, rooms: impl IntoIterator<Item = &'a dyn RoomManager>) {
        let progress = rooms.into_iter().map(|room| room.progress()).filter(|p| self.accepts(p)).last();
        let Some(progress) = progress else {
            return;
        };

        match (self, progress) {
            (RoomAnimatorController::Basement(rig), RoomProgress::Generators(count))
            | (RoomAnimatorController::Greenhouse(rig), RoomProgress::Greenhouse(count))
            | (RoomAnimatorController::Finale(rig), RoomProgress::Finale(count)) => {
                rig.animator.set_integer(ANIM_PROP_PROGRESS, count);
            }
            (RoomAnimatorController::GearRoom(rig), RoomProgress::GearObjectives { pulled_lever, cranked_crank }) => {
                rig.animator.set_bool(ANIM_PROP_PULLED_LEVER, pulled_lever);
                rig.animator.set_bool(ANIM_PROP_CRANKED_CRANK, cranked_crank);
            }
            _ => {}
        }
    }

    fn accepts(&self, progress: &RoomProgress) -> bool {
        matches!(
            (self, progress),
            (RoomAnimatorController::Basement(_), RoomProgress::Generators(_))
                | (RoomAnimatorController::GearRoom(_), RoomProgress::GearObjectives { .. })
                | (RoomAnimatorController::Greenhouse(_), RoomProgress::Greenhouse(_))
                | (RoomAnimatorController::Finale(_), RoomProgress::Finale(_))
        )
    }
}

/// The elevator display's attachment point for a room rig.
#[derive(Debug, Clone, Default)]
pub struct RoomAnimatorSlot {
    controller: Option<RoomAnimatorController>,
    swaps: u32,
}

impl RoomAnimatorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches the rig `room` asks for. A rig of the same kind is kept as
    /// is; any other is replaced. Nothing changes when the room has no rig.
    pub fn attach(&mut self, room: Option<&RoomDefinition>) -> Option<&RoomAnimatorController> {
        let Some(room) = room else {
            log::error!("Null room definition");
            return None;
        };
        let Some(template) = room.animator_controller.as_ref() else {
            log::error!("No room specific elevator animator controller for {}", room.name);
            return None;
        };

        let reusable = self.controller.as_ref().is_some_and(|c| c.kind() == template.kind);
        if !reusable {
            log::debug!("Attaching {} elevator animator for {}", template.kind, room.name);
            self.controller = Some(RoomAnimatorController::from_template(template));
            self.swaps += 1;
        }
        self.controller.as_ref()
    }

    pub fn update<'a>(&mut self, rooms: impl IntoIterator<Item = &'a dyn RoomManager>) {
        if let Some(controller) = self.controller.as_mut() {
            controller.update(rooms);
        }
    }

    pub fn controller(&self) -> Option<&RoomAnimatorController> {
        self.controller.as_ref()
    }

    /// How many rigs have been constructed.
    pub fn swaps(&self) -> u32 {
        self.swaps
    }
}
