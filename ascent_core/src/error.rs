// ascent_core/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

pub type AscentResult<T> = Result<T, AscentError>;

/// Every failure the room sequencing core reports to its caller.
///
/// Configuration errors are fatal at startup. Load errors are returned from
/// `GameManager::load_room` or surface through the async load sequence.
#[derive(Debug, Error)]
pub enum AscentError {
    #[error("MasterConfiguration is not set in the GameManager template")]
    MissingMasterConfiguration,

    #[error("MasterConfiguration exists, but has no RoomConfiguration")]
    MissingRoomConfiguration,

    #[error("first room is missing; is the RoomConfiguration set up correctly?")]
    MissingFirstRoom,

    #[error("room `{0}` must have a non-empty scene path")]
    EmptyScenePath(String),

    #[error("cannot load `{requested}` while `{pending}` is still loading")]
    LoadInFlight { requested: String, pending: String },

    #[error("scene `{0}` is not known to the scene loader")]
    UnknownScene(String),

    #[error("scene load for `{0}` was dropped before it finished")]
    LoadCancelled(String),

    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse {path}: {source}")]
    Ron {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("could not write {path}: {source}")]
    RonWrite {
        path: PathBuf,
        #[source]
        source: ron::Error,
    },

    #[error("could not parse {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not start the logger: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),
}

impl AscentError {
    /// Whether this error belongs to the fatal configuration class.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AscentError::MissingMasterConfiguration
                | AscentError::MissingRoomConfiguration
                | AscentError::MissingFirstRoom
                | AscentError::EmptyScenePath(_)
        )
    }
}
