// ascent_core/src/scene/loader.rs
use crate::error::AscentResult;
use crate::lighting::room_lighting::RenderSettings;
use crate::scene::frame::FrameSignal;
use crate::world::room_manager::RoomManager;
use futures::future::LocalBoxFuture;
use std::fmt;
use uuid::Uuid;

/// Identifies one loaded unit of scene content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneHandle(Uuid);

impl SceneHandle {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SceneHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SceneHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a finished scene load hands the game manager.
pub struct SceneContent {
    pub room: Box<dyn RoomManager>,
    /// Fog settings that become global once the scene is active.
    pub render: RenderSettings,
}

/// Loads room scenes additively. Both futures are driven by the game
/// manager's executor and may await `frames` to spread work over frames.
pub trait SceneLoader {
    fn load(&self, scene_path: &str, frames: &FrameSignal) -> LocalBoxFuture<'static, AscentResult<SceneContent>>;

    /// Fire and forget; nothing waits for the result.
    fn unload(&self, scene_path: &str, frames: &FrameSignal) -> LocalBoxFuture<'static, ()>;
}
