// ascent_core/src/storage/mod.rs
pub mod core_storage;
