//! The generated note event — the unit handed to the host.
//!
//! A [`NoteEvent`] is created by the performance layer and never mutated
//! after emission. Ticks are at 960 PPQN; mapping ticks to wall-clock time
//! and inserting events into a persistent timeline are host concerns.

use serde::{Deserialize, Serialize};

use crate::voice::{Limb, Voice};

/// A single generated percussion note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Which drum voice this note belongs to.
    pub voice: Voice,
    /// General MIDI percussion note number.
    pub pitch: u8,
    /// MIDI velocity, always in `1..=127`.
    pub velocity: u8,
    /// Start position in ticks from the beginning of the pattern.
    pub start_tick: u64,
    /// Note length in ticks.
    pub duration_ticks: u64,
    /// The limb that plays this note.
    pub limb: Limb,
}

impl NoteEvent {
    /// Build an event for `voice` using its default pitch and duration.
    pub fn at(voice: Voice, start_tick: u64, velocity: u8, limb: Limb) -> Self {
        Self {
            voice,
            pitch: voice.gm_pitch(),
            velocity: velocity.clamp(1, 127),
            start_tick,
            duration_ticks: voice.duration_ticks(),
            limb,
        }
    }
}

/// Sort events the way the host expects them: by time, then canonical
/// voice order for simultaneous notes.
pub fn sort_events(events: &mut [NoteEvent]) {
    events.sort_by_key(|e| (e.start_tick, e.voice.order_index()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_fills_pitch_and_duration_from_voice() {
        let e = NoteEvent::at(Voice::OpenHat, 960, 90, Limb::RightHand);
        assert_eq!(e.pitch, 46);
        assert_eq!(e.duration_ticks, 480);
        assert_eq!(e.velocity, 90);
    }

    #[test]
    fn velocity_is_clamped_into_midi_range() {
        let e = NoteEvent::at(Voice::Kick, 0, 0, Limb::RightFoot);
        assert_eq!(e.velocity, 1);
    }

    #[test]
    fn sort_orders_by_tick_then_voice() {
        let mut events = vec![
            NoteEvent::at(Voice::Snare, 240, 100, Limb::LeftHand),
            NoteEvent::at(Voice::Kick, 0, 100, Limb::RightFoot),
            NoteEvent::at(Voice::Kick, 240, 100, Limb::RightFoot),
        ];
        sort_events(&mut events);
        assert_eq!(events[0].voice, Voice::Kick);
        assert_eq!(events[0].start_tick, 0);
        assert_eq!(events[1].voice, Voice::Kick);
        assert_eq!(events[2].voice, Voice::Snare);
    }
}
