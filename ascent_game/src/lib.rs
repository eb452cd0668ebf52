// ascent_game/src/lib.rs
pub mod autopilot;
pub mod kiosk;
pub mod settings;
