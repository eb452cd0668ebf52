// ascent_core/src/rooms/finale.rs
use crate::world::room_manager::{ElevatorProbe, RoomBase, RoomManager, RoomProgress};
use crate::world::room_state::RoomState;
use serde::{Deserialize, Serialize};

const VO_INTRO: &str = "10_TESTROOM_intro_1";
const VO_INITIATE: &str = "10_TESTROOM_initiatetestseq_1";
const VO_GOODBYE: &str = "10_TESTROOM_simplebye_1";

/// An instrument group the player has to play a number of times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentRequirement {
    pub group: String,
    #[serde(default = "default_required_plays")]
    pub required_plays: u32,
    #[serde(skip)]
    unique_plays: u32,
    #[serde(skip)]
    has_completed: bool,
}

fn default_required_plays() -> u32 {
    1
}

impl InstrumentRequirement {
    pub fn new(group: impl Into<String>, required_plays: u32) -> Self {
        Self {
            group: group.into(),
            required_plays,
            unique_plays: 0,
            has_completed: false,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.unique_plays >= self.required_plays
    }

    pub fn unique_plays(&self) -> u32 {
        self.unique_plays
    }
}

/// Pacing of the closing sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinaleTiming {
    /// Seconds between meeting every requirement and the play-along.
    pub complete_all_delay: f32,
    /// Frames the room's audio takes to fade back in.
    pub playalong_fade_in_frames: u32,
    /// Seconds of play-along before the experience ends.
    pub end_delay: f32,
}

impl Default for FinaleTiming {
    fn default() -> Self {
        Self {
            complete_all_delay: 5.0,
            playalong_fade_in_frames: 50,
            end_delay: 5.0,
        }
    }
}

/// Steps of the closing sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FinalePhase {
    Listening,
    AwaitingPlayalong { remaining: f32 },
    FadingIn { frame: u32 },
    Closing { remaining: f32 },
    Finished,
}

/// Last room. It never lets the elevator leave; meeting every instrument
/// requirement plays the closing sequence, which ends the experience.
pub struct FinaleRoomManager {
    base: RoomBase,
    requirements: Vec<InstrumentRequirement>,
    timing: FinaleTiming,
    phase: FinalePhase,
    completed_requirements: usize,
    /// Seconds since the synchronized play-along started.
    playback_time: f32,
    /// Volume scale applied to the room's audio during the fade in.
    playalong_volume: f32,
    progress: i32,
}

impl FinaleRoomManager {
    pub fn new(base: RoomBase, requirements: Vec<InstrumentRequirement>, timing: FinaleTiming) -> Self {
        Self {
            base,
            requirements,
            timing,
            phase: FinalePhase::Listening,
            completed_requirements: 0,
            playback_time: 0.0,
            playalong_volume: 1.0,
            progress: 0,
        }
    }

    /// Counts a distinct play on every requirement watching `group`.
    pub fn record_unique_play(&mut self, group: &str) {
        for requirement in self.requirements.iter_mut().filter(|r| r.group == group) {
            requirement.unique_plays += 1;
        }
    }

    pub fn set_progress(&mut self, progress: i32) {
        self.progress = progress;
    }

    pub fn phase(&self) -> FinalePhase {
        self.phase
    }

    pub fn requirements(&self) -> &[InstrumentRequirement] {
        &self.requirements
    }

    pub fn completed_requirements(&self) -> usize {
        self.completed_requirements
    }

    pub fn is_playing_final_music(&self) -> bool {
        matches!(
            self.phase,
            FinalePhase::FadingIn { .. } | FinalePhase::Closing { .. } | FinalePhase::Finished
        )
    }

    pub fn synchronized_playback_time(&self) -> f32 {
        if self.is_playing_final_music() { self.playback_time } else { 0.0 }
    }

    pub fn playalong_volume(&self) -> f32 {
        self.playalong_volume
    }

    fn update_requirements(&mut self) {
        for requirement in self.requirements.iter_mut() {
            if requirement.is_completed() && !requirement.has_completed {
                log::info!("Instrument group {} complete", requirement.group);
                requirement.has_completed = true;
            }
        }
        self.completed_requirements = self.requirements.iter().filter(|r| r.is_completed()).count();
    }

    fn advance_sequence(&mut self, dt: f32) {
        if self.is_playing_final_music() {
            self.playback_time += dt;
        }

        let phase = self.phase;
        self.phase = match phase {
            FinalePhase::Listening if self.requirements.iter().all(InstrumentRequirement::is_completed) => {
                self.base.voice_over.replace_event(VO_INITIATE);
                FinalePhase::AwaitingPlayalong { remaining: self.timing.complete_all_delay }
            }
            FinalePhase::AwaitingPlayalong { remaining } if remaining - dt > 0.0 => {
                FinalePhase::AwaitingPlayalong { remaining: remaining - dt }
            }
            FinalePhase::AwaitingPlayalong { .. } => {
                log::info!("Finale play-along started");
                self.playback_time = 0.0;
                self.playalong_volume = 0.0;
                self.base.voice_over.replace_event(VO_GOODBYE);
                FinalePhase::FadingIn { frame: 0 }
            }
            FinalePhase::FadingIn { frame } => {
                let frames = self.timing.playalong_fade_in_frames.max(1);
                let frame = frame + 1;
                self.playalong_volume = frame as f32 / frames as f32;
                if frame >= frames {
                    FinalePhase::Closing { remaining: self.timing.end_delay }
                } else {
                    FinalePhase::FadingIn { frame }
                }
            }
            FinalePhase::Closing { remaining } if remaining - dt > 0.0 => {
                FinalePhase::Closing { remaining: remaining - dt }
            }
            FinalePhase::Closing { .. } => {
                log::info!("Finale sequence complete");
                FinalePhase::Finished
            }
            other => other,
        };
    }
}

impl RoomManager for FinaleRoomManager {
    room_manager_common!();

    fn state(&self) -> RoomState {
        RoomState::Incomplete
    }

    fn in_room(&mut self) {
        self.base.voice_over.add_event(VO_INTRO);
    }

    fn update(&mut self, dt: f32, _probe: &ElevatorProbe) {
        self.update_requirements();
        self.advance_sequence(dt);
    }

    fn progress(&self) -> RoomProgress {
        RoomProgress::Finale(self.progress)
    }

    fn experience_complete(&self) -> bool {
        self.phase == FinalePhase::Finished
    }
}
