// ascent_core/src/scene/mod.rs
pub mod catalog_loader;
pub mod frame;
pub mod layout;
pub mod loader;
