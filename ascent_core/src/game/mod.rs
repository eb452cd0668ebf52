// ascent_core/src/game/mod.rs
#[allow(clippy::module_inception)]
pub mod game;
pub mod game_manager;
