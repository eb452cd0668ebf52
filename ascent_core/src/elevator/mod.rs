// ascent_core/src/elevator/mod.rs
pub mod elevator;
pub mod room_animator;
