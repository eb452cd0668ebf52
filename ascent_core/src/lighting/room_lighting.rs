// ascent_core/src/lighting/room_lighting.rs
use crate::math::{lerp_clamped, lerp_color};
use crate::lighting::fog_blender::BlendMaterial;
use crate::world::room_manager::RoomBase;
use glam::Vec4;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, FromInto};
use std::fmt;
use strum_macros::{Display, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumIter)]
pub enum FogMode {
    Linear,
    Exponential,
    #[default]
    ExponentialSquared,
}

/// Global fog state. Loading a scene makes its settings the global ones.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub fog: bool,
    pub fog_mode: FogMode,
    #[serde_as(as = "FromInto<[f32; 4]>")]
    pub fog_color: Vec4,
    pub fog_density: f32,
    pub fog_start_distance: f32,
    pub fog_end_distance: f32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            fog: false,
            fog_mode: FogMode::ExponentialSquared,
            fog_color: Vec4::new(0.5, 0.5, 0.5, 1.0),
            fog_density: 0.01,
            fog_start_distance: 0.0,
            fog_end_distance: 300.0,
        }
    }
}

/// Everything the lighting code writes to: render globals plus the main
/// camera's clear colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub render: RenderSettings,
    pub camera_clear_color: Vec4,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            render: RenderSettings::default(),
            camera_clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

/// Point in time capture of a room's fog and clear colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoomLightingSettings {
    pub fog_enabled: bool,
    pub fog_mode: FogMode,
    pub fog_color: Vec4,
    pub fog_density: f32,
    pub fog_start_distance: f32,
    pub fog_end_distance: f32,
    pub camera_clear_color: Vec4,
    /// Crossfade between the pedestal's two textures.
    pub pedestal_blend: f32,
}

impl Default for RoomLightingSettings {
    fn default() -> Self {
        Self::capture(&Environment::default(), None)
    }
}

impl RoomLightingSettings {
    /// Snapshots the render globals. The clear colour comes from `room`, or
    /// black without one.
    pub fn capture(environment: &Environment, room: Option<&RoomBase>) -> Self {
        let render = &environment.render;
        Self {
            fog_enabled: render.fog,
            fog_mode: render.fog_mode,
            fog_color: render.fog_color,
            fog_density: render.fog_density,
            fog_start_distance: render.fog_start_distance,
            fog_end_distance: render.fog_end_distance,
            camera_clear_color: room
                .map(|r| r.camera_clear_color)
                .unwrap_or(Vec4::new(0.0, 0.0, 0.0, 1.0)),
            pedestal_blend: 0.0,
        }
    }

    /// Blends `start` towards `end`. Fields with no in-between snap to
    /// `end` from the halfway point on.
    pub fn lerp(start: &RoomLightingSettings, end: &RoomLightingSettings, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let snap = |a, b| if t < 0.5 { a } else { b };

        Self {
            fog_enabled: snap(start.fog_enabled, end.fog_enabled),
            fog_mode: if t < 0.5 { start.fog_mode } else { end.fog_mode },
            fog_color: lerp_color(start.fog_color, end.fog_color, t),
            fog_density: lerp_clamped(start.fog_density, end.fog_density, t),
            fog_start_distance: lerp_clamped(start.fog_start_distance, end.fog_start_distance, t),
            fog_end_distance: lerp_clamped(start.fog_end_distance, end.fog_end_distance, t),
            camera_clear_color: lerp_color(start.camera_clear_color, end.camera_clear_color, t),
            pedestal_blend: t,
        }
    }

    /// Pushes the settings into the globals and the pedestal material.
    pub fn set(&self, environment: &mut Environment, material: Option<&mut BlendMaterial>) {
        let render = &mut environment.render;
        render.fog = self.fog_enabled;
        render.fog_mode = self.fog_mode;
        render.fog_color = self.fog_color;
        render.fog_density = self.fog_density;
        render.fog_start_distance = self.fog_start_distance;
        render.fog_end_distance = self.fog_end_distance;

        environment.camera_clear_color = self.camera_clear_color;

        if let Some(material) = material {
            material.tex_blend = self.pedestal_blend;
        }
    }
}

impl fmt::Display for RoomLightingSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{},{},{},{},{},{},{})",
            self.fog_enabled,
            self.fog_mode,
            self.fog_color,
            self.fog_density,
            self.fog_start_distance,
            self.fog_end_distance,
            self.camera_clear_color,
            self.pedestal_blend
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::room_manager::ElevatorPlanes;

    fn dim() -> RoomLightingSettings {
        RoomLightingSettings {
            fog_enabled: false,
            fog_mode: FogMode::Linear,
            fog_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            fog_density: 0.0,
            fog_start_distance: 1.0,
            fog_end_distance: 10.0,
            camera_clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            pedestal_blend: 0.0,
        }
    }

    fn bright() -> RoomLightingSettings {
        RoomLightingSettings {
            fog_enabled: true,
            fog_mode: FogMode::Exponential,
            fog_color: Vec4::new(1.0, 0.5, 0.25, 1.0),
            fog_density: 0.2,
            fog_start_distance: 5.0,
            fog_end_distance: 50.0,
            camera_clear_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            pedestal_blend: 1.0,
        }
    }

    #[test]
    fn lerp_at_zero_is_start() {
        let blended = RoomLightingSettings::lerp(&dim(), &bright(), 0.0);
        assert_eq!(blended, dim());
    }

    #[test]
    fn lerp_at_one_is_end() {
        let blended = RoomLightingSettings::lerp(&dim(), &bright(), 1.0);
        assert_eq!(blended, bright());
    }

    #[test]
    fn discrete_fields_snap_to_end_at_half() {
        let before = RoomLightingSettings::lerp(&dim(), &bright(), 0.49);
        assert!(!before.fog_enabled);
        assert_eq!(before.fog_mode, FogMode::Linear);

        let half = RoomLightingSettings::lerp(&dim(), &bright(), 0.5);
        assert!(half.fog_enabled);
        assert_eq!(half.fog_mode, FogMode::Exponential);
        assert_eq!(half.fog_start_distance, 3.0);
        assert_eq!(half.fog_end_distance, 30.0);
        assert_eq!(half.pedestal_blend, 0.5);
    }

    #[test]
    fn lerp_clamps_t() {
        assert_eq!(RoomLightingSettings::lerp(&dim(), &bright(), -2.0), dim());
        assert_eq!(RoomLightingSettings::lerp(&dim(), &bright(), 3.0), bright());
    }

    #[test]
    fn capture_takes_clear_color_from_room() {
        let environment = Environment::default();
        let room = RoomBase::new("Lobby", 0.0, ElevatorPlanes::default())
            .with_clear_color(Vec4::new(0.2, 0.3, 0.4, 1.0));

        let with_room = RoomLightingSettings::capture(&environment, Some(&room));
        assert_eq!(with_room.camera_clear_color, Vec4::new(0.2, 0.3, 0.4, 1.0));

        let without = RoomLightingSettings::capture(&environment, None);
        assert_eq!(without.camera_clear_color, Vec4::new(0.0, 0.0, 0.0, 1.0));
        assert_eq!(without.fog_density, environment.render.fog_density);
    }

    #[test]
    fn set_writes_globals_and_material() {
        let mut environment = Environment::default();
        let mut material = BlendMaterial::default();
        bright().set(&mut environment, Some(&mut material));

        assert!(environment.render.fog);
        assert_eq!(environment.render.fog_end_distance, 50.0);
        assert_eq!(environment.camera_clear_color, Vec4::ONE);
        assert_eq!(material.tex_blend, 1.0);
        assert_eq!(RoomLightingSettings::capture(&environment, None).fog_color, bright().fog_color);
    }

    #[test]
    fn render_settings_parse_from_ron() {
        let render: RenderSettings = ron::from_str("(fog: true, fog_color: (0.1, 0.2, 0.3, 1.0))").unwrap();
        assert!(render.fog);
        assert_eq!(render.fog_color, Vec4::new(0.1, 0.2, 0.3, 1.0));
        assert_eq!(render.fog_end_distance, 300.0);
    }
}
