//! Physical limb simulation — which limb plays a voice, and whether it
//! has had time to get there.
//!
//! Four limbs, fixed assignments for pedals and timekeeping voices, a
//! random hand for everything else. A strike is vetoed outright when the
//! limb cannot physically reach the voice in time; there is no retry or
//! retiming, the note simply does not sound.

use crate::rng::DrawSource;
use crate::voice::{Limb, Voice};

/// Minimum interval between two strikes of the same foot.
const FOOT_INTERVAL: f64 = 0.06;

/// Absolute floor between two strikes of the same hand.
const HAND_INTERVAL: f64 = 0.01;

/// Seconds a hand needs to move from one voice to another. Same-voice
/// repeats are near-free; moves within a cluster are quick; crossing the
/// kit costs the full interval.
pub fn movement_seconds(from: Voice, to: Voice) -> f64 {
    use Voice::*;
    if from == to {
        return 0.010;
    }
    match (from, to) {
        (ClosedHat | OpenHat | HatPedal, ClosedHat | OpenHat | HatPedal) => 0.015,
        (Snare | SnareAccent, SideStick) | (SideStick, Snare | SnareAccent) => 0.020,
        (Snare | SnareAccent, ClosedHat | OpenHat) | (ClosedHat | OpenHat, Snare | SnareAccent) => {
            0.035
        }
        (LowTom, MidTom) | (MidTom, LowTom) | (MidTom, HighTom) | (HighTom, MidTom) => 0.030,
        _ => 0.060,
    }
}

/// Which limb plays this voice. Kick and the hat pedal are feet, the
/// timekeeping voices are the right hand; anything else takes one draw to
/// choose a hand.
pub fn assign_limb(voice: Voice, rng: &mut dyn DrawSource) -> Limb {
    match voice {
        Voice::Kick => Limb::RightFoot,
        Voice::HatPedal => Limb::LeftFoot,
        Voice::ClosedHat | Voice::OpenHat | Voice::Ride => Limb::RightHand,
        _ => {
            if rng.chance(0.5) {
                Limb::RightHand
            } else {
                Limb::LeftHand
            }
        }
    }
}

/// Per-run limb state: last strike time and voice for each limb. Reset by
/// constructing a fresh tracker; nothing survives across runs.
#[derive(Debug, Default)]
pub struct LimbTracker {
    last: [Option<(f64, Voice)>; Limb::COUNT],
}

impl LimbTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `limb` can strike `voice` at `time` (seconds from the
    /// start of the run). Pure check; does not record.
    pub fn can_strike(&self, limb: Limb, voice: Voice, time: f64) -> bool {
        let (last_time, last_voice) = match self.last[limb.index()] {
            Some(state) => state,
            None => return true,
        };
        let dt = time - last_time;
        if limb.is_foot() {
            dt >= FOOT_INTERVAL
        } else {
            dt >= HAND_INTERVAL && dt >= movement_seconds(last_voice, voice)
        }
    }

    /// Attempt a strike: on success the limb state advances and the note
    /// may sound; on failure nothing changes and the note is dropped.
    pub fn try_strike(&mut self, limb: Limb, voice: Voice, time: f64) -> bool {
        if !self.can_strike(limb, voice, time) {
            return false;
        }
        self.last[limb.index()] = Some((time, voice));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ReplaySource;

    #[test]
    fn fixed_assignments_draw_nothing() {
        let mut rng = ReplaySource::new(vec![]);
        assert_eq!(assign_limb(Voice::Kick, &mut rng), Limb::RightFoot);
        assert_eq!(assign_limb(Voice::HatPedal, &mut rng), Limb::LeftFoot);
        assert_eq!(assign_limb(Voice::ClosedHat, &mut rng), Limb::RightHand);
        assert_eq!(assign_limb(Voice::Ride, &mut rng), Limb::RightHand);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn free_voices_draw_a_hand() {
        let mut rng = ReplaySource::new(vec![0.2, 0.8]);
        assert_eq!(assign_limb(Voice::Snare, &mut rng), Limb::RightHand);
        assert_eq!(assign_limb(Voice::Snare, &mut rng), Limb::LeftHand);
    }

    #[test]
    fn first_strike_is_always_allowed() {
        let tracker = LimbTracker::new();
        assert!(tracker.can_strike(Limb::RightHand, Voice::Snare, 0.0));
    }

    #[test]
    fn feet_need_sixty_milliseconds() {
        let mut tracker = LimbTracker::new();
        assert!(tracker.try_strike(Limb::RightFoot, Voice::Kick, 0.0));
        assert!(!tracker.try_strike(Limb::RightFoot, Voice::Kick, 0.059));
        assert!(tracker.try_strike(Limb::RightFoot, Voice::Kick, 0.06));
    }

    #[test]
    fn hands_respect_movement_time() {
        let mut tracker = LimbTracker::new();
        assert!(tracker.try_strike(Limb::RightHand, Voice::Snare, 0.0));
        // Same voice again quickly: fine past 10ms.
        assert!(tracker.try_strike(Limb::RightHand, Voice::Snare, 0.012));
        // Jump across the kit needs 60ms.
        assert!(!tracker.try_strike(Limb::RightHand, Voice::Crash, 0.04));
        assert!(tracker.try_strike(Limb::RightHand, Voice::Crash, 0.012 + 0.06));
    }

    #[test]
    fn rejected_strike_leaves_state_untouched() {
        let mut tracker = LimbTracker::new();
        assert!(tracker.try_strike(Limb::LeftHand, Voice::Snare, 0.0));
        assert!(!tracker.try_strike(Limb::LeftHand, Voice::Crash, 0.02));
        // Still measured from the accepted strike at t=0.
        assert!(tracker.try_strike(Limb::LeftHand, Voice::Crash, 0.06));
    }

    #[test]
    fn movement_table_is_symmetric_for_near_pairs() {
        assert_eq!(
            movement_seconds(Voice::Snare, Voice::ClosedHat),
            movement_seconds(Voice::ClosedHat, Voice::Snare)
        );
        assert_eq!(movement_seconds(Voice::Snare, Voice::Snare), 0.010);
        assert_eq!(movement_seconds(Voice::Kick, Voice::Crash), 0.060);
    }
}
