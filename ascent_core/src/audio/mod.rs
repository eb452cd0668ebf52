// ascent_core/src/audio/mod.rs
pub mod voice_over;
