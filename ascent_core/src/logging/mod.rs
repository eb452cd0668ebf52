// ascent_core/src/logging/mod.rs
#[allow(clippy::module_inception)]
pub mod logging;
