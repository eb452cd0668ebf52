// ascent_core/src/animation/mod.rs
pub mod animator;
pub mod curve;
