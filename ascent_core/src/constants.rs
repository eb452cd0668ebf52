// ascent_core/src/constants.rs

/// 60Hz frame step for the kiosk loop.
pub const FIXED_DT: f32 = 1.0 / 60.0;
/// Protects against long freezes.
pub const MAX_ACCUM: f32 = 0.5;

/// Highest curve velocity that is clipped to zero. Authored curves are
/// eye-balled and rarely land exactly on zero.
pub const VELOCITY_CLIP: f32 = 0.0005;

/// Distance under which the elevator snaps onto a floor.
pub const DEFAULT_ROUNDING_THRESHOLD: f32 = 0.0001;

/// Default elevator speed multiplier.
pub const DEFAULT_MOVEMENT_SPEED: f32 = 1.0;

/// Seconds the fog blender takes to crossfade two rooms.
pub const DEFAULT_BLEND_TIME: f32 = 2.0;

/// Timer value of an idle fog blender.
pub const BLEND_INACTIVE: f32 = -1.0;

/// Default interaction distances for the controller pointer.
pub const DEFAULT_MAX_LASER_DISTANCE: f32 = 5.0;
pub const DEFAULT_MAX_RETICLE_DISTANCE: f32 = 5.0;

/// Name of the elevator's own animator parameter.
pub const ANIM_PROP_MOVING: &str = "moving";
pub const ANIM_PROP_PROGRESS: &str = "progress";
pub const ANIM_PROP_PULLED_LEVER: &str = "pulledLever";
pub const ANIM_PROP_CRANKED_CRANK: &str = "crankedCrank";

/// Generators the basement needs running before it is complete.
pub const BASEMENT_REQUIRED_GENERATORS: usize = 3;

/// Frames the lobby screen must stay silent before playback counts as done.
pub const LOBBY_SILENCE_GRACE_FRAMES: u32 = 5;

/// Name of the master configuration .ron file.
pub const MASTER_CONFIG_RON: &str = "master_config.ron";

/// Name of the scene layout .ron file.
pub const SCENES_RON: &str = "scenes.ron";

/// Name of the elevator settings .ron file.
pub const ELEVATOR_RON: &str = "elevator.ron";

/// Name of the runtime settings file.
pub const SETTINGS_TOML: &str = "ascent.toml";

/// Name of the folder that holds the game data.
pub const DATA_FOLDER: &str = "data";

/// Basename of the rotating log files.
pub const LOG_BASENAME: &str = "ascent";
