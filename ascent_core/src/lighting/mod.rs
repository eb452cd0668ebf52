// ascent_core/src/lighting/mod.rs
pub mod fog_blender;
pub mod room_lighting;
