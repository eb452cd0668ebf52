// ascent_core/src/rooms/lobby.rs
use crate::animation::animator::Animator;
use crate::constants::LOBBY_SILENCE_GRACE_FRAMES;
use crate::world::room_manager::{ElevatorProbe, RoomBase, RoomManager};
use crate::world::room_state::RoomState;

const ANIM_PROP_PLAYING: &str = "playing";
const ANIM_PROP_PROCEED: &str = "proceed";
const VO_CONTROLS: &str = "01_LOBBY_controlalt_1";

/// Where the lobby screen is in its intro playback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreenPlayback {
    /// Waiting for the player to press the screen.
    Idle,
    /// Clip is audible for `remaining` more seconds.
    Playing { remaining: f32 },
    /// Clip went quiet; counting silent frames before trusting it.
    Settling { silent_frames: u32 },
    Finished,
}

/// First room. Completes once the intro on the lobby screen has been
/// watched to the end.
pub struct LobbyRoomManager {
    base: RoomBase,
    screen: Animator,
    screen_clip_length: f32,
    playback: ScreenPlayback,
    /// Set by the audio layer when it reports the clip playing again.
    audio_resumed: bool,
    completed: bool,
}

impl LobbyRoomManager {
    pub fn new(base: RoomBase, screen_clip_length: f32) -> Self {
        let mut screen = Animator::new();
        screen.set_bool(ANIM_PROP_PLAYING, false);
        Self {
            base,
            screen,
            screen_clip_length,
            playback: ScreenPlayback::Idle,
            audio_resumed: false,
            completed: false,
        }
    }

    /// The screen button only answers the first press.
    pub fn press_screen(&mut self) -> bool {
        if self.playback != ScreenPlayback::Idle {
            return false;
        }
        self.screen.set_bool(ANIM_PROP_PLAYING, true);
        self.playback = ScreenPlayback::Playing { remaining: self.screen_clip_length };
        true
    }

    /// Losing app focus can make the clip look silent for a few frames.
    /// The audio layer calls this when it hears the clip again.
    pub fn report_audio_playing(&mut self) {
        self.audio_resumed = true;
    }

    pub fn playback(&self) -> ScreenPlayback {
        self.playback
    }

    pub fn screen(&self) -> &Animator {
        &self.screen
    }

    fn advance_playback(&mut self, dt: f32) {
        let resumed = std::mem::take(&mut self.audio_resumed);
        let playback = self.playback;
        self.playback = match playback {
            ScreenPlayback::Playing { remaining } if remaining - dt > 0.0 => {
                ScreenPlayback::Playing { remaining: remaining - dt }
            }
            ScreenPlayback::Playing { .. } => ScreenPlayback::Settling { silent_frames: 0 },
            ScreenPlayback::Settling { .. } if resumed => ScreenPlayback::Settling { silent_frames: 0 },
            ScreenPlayback::Settling { silent_frames } if silent_frames + 1 >= LOBBY_SILENCE_GRACE_FRAMES => {
                self.finish_playback();
                ScreenPlayback::Finished
            }
            ScreenPlayback::Settling { silent_frames } => {
                ScreenPlayback::Settling { silent_frames: silent_frames + 1 }
            }
            other => other,
        };
    }

    fn finish_playback(&mut self) {
        self.screen.set_bool(ANIM_PROP_PLAYING, false);
        self.base.voice_over.add_event(VO_CONTROLS);
        self.completed = true;
    }
}

impl RoomManager for LobbyRoomManager {
    room_manager_common!();

    fn state(&self) -> RoomState {
        if self.completed { RoomState::Complete } else { RoomState::Incomplete }
    }

    fn update(&mut self, dt: f32, probe: &ElevatorProbe) {
        self.advance_playback(dt);
        self.screen.set_bool(ANIM_PROP_PROCEED, probe.moving);
    }
}
