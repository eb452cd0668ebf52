// ascent_core/src/audio/voice_over.rs
use serde::{Deserialize, Serialize};

/// One authored voice-over line.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VoiceOverEvent {
    /// Clip name, also used to address the event.
    pub clip: String,
    /// Seconds between arming the event and playing the clip.
    pub delay: f32,
    #[serde(skip)]
    active: bool,
    #[serde(skip)]
    timer: f32,
}

impl VoiceOverEvent {
    pub fn new(clip: impl Into<String>, delay: f32) -> Self {
        Self {
            clip: clip.into(),
            delay,
            active: false,
            timer: delay,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    fn arm(&mut self) {
        self.timer = self.delay;
        self.active = true;
    }

    fn disarm(&mut self) {
        self.active = false;
        self.timer = self.delay;
    }
}

/// Queue of delayed voice-over lines owned by a room.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct VoiceOverSequencer {
    events: Vec<VoiceOverEvent>,
}

impl VoiceOverSequencer {
    pub fn new(events: Vec<VoiceOverEvent>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[VoiceOverEvent] {
        &self.events
    }

    /// Counts down armed events and returns the clips that fire this frame.
    pub fn update(&mut self, dt: f32) -> Vec<String> {
        let mut fired = Vec::new();
        for event in self.events.iter_mut().filter(|e| e.active) {
            event.timer -= dt;
            if event.timer < 0.0 {
                event.active = false;
                fired.push(event.clip.clone());
            }
        }
        fired
    }

    /// Arms every event named `clip`. Returns false when none exists.
    pub fn add_event(&mut self, clip: &str) -> bool {
        let mut found = false;
        for event in self.events.iter_mut().filter(|e| e.clip == clip) {
            event.arm();
            found = true;
        }
        if !found {
            log::debug!("No voice-over event called {clip} was found");
        }
        found
    }

    /// Silences everything, then arms `clip`.
    pub fn replace_event(&mut self, clip: &str) -> bool {
        self.stop_all_events();
        self.add_event(clip)
    }

    pub fn stop_event(&mut self, clip: &str) {
        for event in self.events.iter_mut().filter(|e| e.clip == clip) {
            event.disarm();
        }
    }

    pub fn stop_all_events(&mut self) {
        for event in self.events.iter_mut() {
            event.disarm();
        }
    }

    pub fn is_armed(&self, clip: &str) -> bool {
        self.events.iter().any(|e| e.clip == clip && e.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequencer() -> VoiceOverSequencer {
        VoiceOverSequencer::new(vec![
            VoiceOverEvent::new("intro", 1.0),
            VoiceOverEvent::new("hint", 0.0),
        ])
    }

    #[test]
    fn fires_after_delay_once() {
        let mut vo = sequencer();
        assert!(vo.add_event("intro"));

        assert!(vo.update(0.5).is_empty());
        assert_eq!(vo.update(0.6), vec!["intro".to_string()]);
        assert!(vo.update(5.0).is_empty());
    }

    #[test]
    fn zero_delay_fires_on_next_update() {
        let mut vo = sequencer();
        vo.add_event("hint");
        assert_eq!(vo.update(0.016), vec!["hint".to_string()]);
    }

    #[test]
    fn unknown_event_is_reported() {
        let mut vo = sequencer();
        assert!(!vo.add_event("missing"));
    }

    #[test]
    fn replace_silences_other_events() {
        let mut vo = sequencer();
        vo.add_event("intro");
        vo.replace_event("hint");

        assert!(!vo.is_armed("intro"));
        assert!(vo.is_armed("hint"));
        assert_eq!(vo.update(2.0), vec!["hint".to_string()]);
    }

    #[test]
    fn stop_event_resets_timer() {
        let mut vo = sequencer();
        vo.add_event("intro");
        vo.update(0.9);
        vo.stop_event("intro");
        vo.add_event("intro");

        // Full delay again after re-arming
        assert!(vo.update(0.9).is_empty());
    }
}
