// ascent_core/src/lib.rs
pub mod animation;
pub mod audio;
pub mod constants;
pub mod elevator;
pub mod error;
pub mod game;
pub mod lighting;
pub mod logging;
pub mod math;
pub mod rooms;
pub mod scene;
pub mod storage;
pub mod world;

pub use error::{AscentError, AscentResult};
