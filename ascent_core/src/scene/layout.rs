// ascent_core/src/scene/layout.rs
use crate::audio::voice_over::VoiceOverSequencer;
use crate::lighting::room_lighting::RenderSettings;
use crate::rooms::{build_room, RoomKind};
use crate::scene::loader::SceneContent;
use crate::world::room_manager::{ElevatorPlanes, RoomBase};
use glam::Vec4;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, FromInto};

fn white() -> Vec4 {
    Vec4::ONE
}

/// Authored content of one room scene.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneLayout {
    pub scene_path: String,
    pub kind: RoomKind,
    /// Y of the room's root as authored.
    #[serde(default)]
    pub origin_y: f32,
    pub planes: ElevatorPlanes,
    #[serde_as(as = "FromInto<[f32; 4]>")]
    #[serde(default = "white")]
    pub camera_clear_color: Vec4,
    #[serde(default)]
    pub pedestal_texture: Option<String>,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub voice_over: VoiceOverSequencer,
}

impl SceneLayout {
    pub fn new(scene_path: impl Into<String>, kind: RoomKind, origin_y: f32, planes: ElevatorPlanes) -> Self {
        Self {
            scene_path: scene_path.into(),
            kind,
            origin_y,
            planes,
            camera_clear_color: white(),
            pedestal_texture: None,
            render: RenderSettings::default(),
            voice_over: VoiceOverSequencer::default(),
        }
    }

    /// Builds fresh runtime content for this scene.
    pub fn instantiate(&self) -> SceneContent {
        let base = RoomBase::new(self.kind.to_string(), self.origin_y, self.planes)
            .with_clear_color(self.camera_clear_color)
            .with_pedestal_texture(self.pedestal_texture.clone())
            .with_voice_over(self.voice_over.clone());

        SceneContent {
            room: build_room(&self.kind, base),
            render: self.render,
        }
    }
}

/// Every scene the kiosk can load.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SceneCatalog {
    pub scenes: Vec<SceneLayout>,
}

impl SceneCatalog {
    pub fn new(scenes: Vec<SceneLayout>) -> Self {
        Self { scenes }
    }

    pub fn find(&self, scene_path: &str) -> Option<&SceneLayout> {
        self.scenes
            .iter()
            .find(|layout| layout.scene_path.eq_ignore_ascii_case(scene_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::room_state::RoomState;

    const LAYOUT: &str = r#"
        (
            scenes: [
                (
                    scene_path: "Scenes/Shaft",
                    kind: PassThrough,
                    origin_y: 4.0,
                    planes: (bottom: 2.0, floor: 4.0, ceiling: 6.0, top: 8.0),
                    camera_clear_color: (0.1, 0.1, 0.2, 1.0),
                    pedestal_texture: Some("shaft_pedestal"),
                    voice_over: [(clip: "hum", delay: 0.5)],
                ),
            ],
        )
    "#;

    #[test]
    fn catalog_parses_and_instantiates() {
        let catalog: SceneCatalog = ron::from_str(LAYOUT).unwrap();
        let layout = catalog.find("scenes/shaft").unwrap();

        let content = layout.instantiate();
        assert_eq!(content.room.state(), RoomState::Skip);
        assert_eq!(content.room.base().planes.top, 8.0);
        assert_eq!(content.room.base().camera_clear_color, Vec4::new(0.1, 0.1, 0.2, 1.0));
        assert_eq!(content.room.base().pedestal_texture.as_deref(), Some("shaft_pedestal"));
        assert_eq!(content.room.base().voice_over.events().len(), 1);
        assert!(!content.render.fog);
    }

    #[test]
    fn unknown_scene_is_not_found() {
        let catalog: SceneCatalog = ron::from_str(LAYOUT).unwrap();
        assert!(catalog.find("Scenes/Attic").is_none());
    }
}
