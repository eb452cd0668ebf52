// ascent_core/src/world/mod.rs
pub mod room_configuration;
pub mod room_definition;
pub mod room_manager;
pub mod room_state;
