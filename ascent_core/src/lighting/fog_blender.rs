// ascent_core/src/lighting/fog_blender.rs
use crate::constants::{BLEND_INACTIVE, DEFAULT_BLEND_TIME};
use crate::lighting::room_lighting::{Environment, RoomLightingSettings};
use crate::math::smooth_step;
use serde::{Deserialize, Serialize};

/// Shared pedestal material crossfading between two room textures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BlendMaterial {
    pub main_tex: Option<String>,
    pub next_tex: Option<String>,
    pub tex_blend: f32,
}

/// Crossfades the global fog from one room's lighting to the next.
#[derive(Debug, Clone)]
pub struct FogBlender {
    blend_time: f32,
    material: BlendMaterial,
    /// Copy of the material as authored, restored on shutdown.
    pristine: BlendMaterial,
    current: RoomLightingSettings,
    goal: RoomLightingSettings,
    /// Normalized progress, or `BLEND_INACTIVE` between transitions.
    timer: f32,
}

impl Default for FogBlender {
    fn default() -> Self {
        Self::new(DEFAULT_BLEND_TIME, BlendMaterial::default(), RoomLightingSettings::default())
    }
}

impl FogBlender {
    pub fn new(blend_time: f32, material: BlendMaterial, initial: RoomLightingSettings) -> Self {
        Self {
            blend_time,
            pristine: material.clone(),
            material,
            current: initial,
            goal: initial,
            timer: BLEND_INACTIVE,
        }
    }

    /// Applies `start` right away and blends towards `end` from the next update.
    pub fn set_settings(&mut self, start: RoomLightingSettings, end: RoomLightingSettings, environment: &mut Environment) {
        self.timer = 0.0;
        start.set(environment, Some(&mut self.material));
        self.current = start;
        self.goal = end;
    }

    pub fn update(&mut self, dt: f32, environment: &mut Environment) {
        if self.timer < 0.0 {
            return;
        }

        self.timer += if self.blend_time > 0.0 { dt / self.blend_time } else { f32::INFINITY };
        let amount = smooth_step(0.0, 1.0, self.timer);
        RoomLightingSettings::lerp(&self.current, &self.goal, amount)
            .set(environment, Some(&mut self.material));

        if self.timer > 1.0 {
            self.timer = BLEND_INACTIVE;
        }
    }

    /// Shifts the pending texture to the front and queues `texture` behind it.
    pub fn set_blend_texture(&mut self, texture: Option<String>) {
        self.material.main_tex = self.material.next_tex.take();
        self.material.next_tex = texture;
        self.material.tex_blend = 0.0;
    }

    /// Puts the material back the way it was authored.
    pub fn reset_material(&mut self) {
        log::info!("Resetting pedestal blend material");
        self.material = self.pristine.clone();
    }

    pub fn is_blending(&self) -> bool {
        self.timer >= 0.0
    }

    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn blend_time(&self) -> f32 {
        self.blend_time
    }

    pub fn material(&self) -> &BlendMaterial {
        &self.material
    }

    pub fn goal(&self) -> &RoomLightingSettings {
        &self.goal
    }
}
