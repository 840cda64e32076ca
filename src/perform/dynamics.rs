//! Intensity and velocity shaping.
//!
//! Intensity is a draw-free 0..1 score combining the section's dynamics
//! offset with phrase and step position; velocity layers accents, an
//! intensity term, a gentle sine arc across the bar, and one jitter draw
//! on top of the voice's base velocity.

use std::f64::consts::PI;

use crate::rng::DrawSource;
use crate::voice::Voice;

/// Phrase-position adjustment over a 4-bar phrase: ease in on the first
/// bar, lean on the last.
fn phrase_adjustment(bar_in_phrase: u32) -> f64 {
    match bar_in_phrase {
        0 => -0.1,
        3 => 0.15,
        _ => 0.0,
    }
}

/// Step-position adjustment: downbeats push, backbeats push a little.
fn step_adjustment(step: usize, steps: usize) -> f64 {
    let per_beat = (steps / 4).max(1);
    if step % per_beat == 0 {
        if step == per_beat || step == 3 * per_beat {
            // Backbeat (beats 2 and 4).
            0.05
        } else {
            0.1
        }
    } else {
        0.0
    }
}

/// Performance intensity for a step, clamped to `[0, 1]`. Draw-free.
pub fn intensity(dynamics_offset: f64, bar_in_phrase: u32, step: usize, steps: usize) -> f64 {
    let raw = 0.5
        + dynamics_offset / 30.0
        + phrase_adjustment(bar_in_phrase)
        + step_adjustment(step, steps);
    raw.clamp(0.0, 1.0)
}

/// Accent bonus on strong steps (every 4th cell of a 16-step grid, and the
/// equivalent on other grid sizes).
fn accent(step: usize, steps: usize) -> f64 {
    let per_beat = (steps / 4).max(1);
    if step % per_beat == 0 {
        15.0
    } else {
        0.0
    }
}

/// Shaped velocity for one note. Exactly one draw (the ±3 jitter).
pub fn velocity(
    voice: Voice,
    step: usize,
    steps: usize,
    intensity: f64,
    rng: &mut dyn DrawSource,
) -> u8 {
    let arc = (PI * step as f64 / steps as f64).sin() * 8.0;
    let shaped = voice.base_velocity()
        + accent(step, steps)
        + (intensity - 0.5) * 40.0
        + arc
        + rng.range_f64(-3.0, 3.0);
    (shaped.round() as i32).clamp(1, 127) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ReplaySource;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn intensity_rises_on_the_last_phrase_bar() {
        let first = intensity(0.0, 0, 2, 16);
        let middle = intensity(0.0, 1, 2, 16);
        let last = intensity(0.0, 3, 2, 16);
        assert!(first < middle);
        assert!(middle < last);
    }

    #[test]
    fn intensity_is_clamped() {
        assert!(intensity(20.0, 3, 0, 16) <= 1.0);
        assert!(intensity(-30.0, 0, 2, 16) >= 0.0);
    }

    #[test]
    fn downbeat_and_backbeat_adjustments() {
        assert_approx_eq!(step_adjustment(0, 16), 0.1);
        assert_approx_eq!(step_adjustment(8, 16), 0.1);
        assert_approx_eq!(step_adjustment(4, 16), 0.05);
        assert_approx_eq!(step_adjustment(12, 16), 0.05);
        assert_approx_eq!(step_adjustment(3, 16), 0.0);
    }

    #[test]
    fn accented_steps_are_louder() {
        // Midpoint jitter (0.5 -> 0.0 ticks of jitter).
        let mut rng = ReplaySource::new(vec![0.5, 0.5]);
        let on_beat = velocity(Voice::Snare, 4, 16, 0.5, &mut rng);
        let off_beat = velocity(Voice::Snare, 5, 16, 0.5, &mut rng);
        assert!(on_beat > off_beat);
    }

    #[test]
    fn velocity_stays_in_midi_range() {
        let mut rng = ReplaySource::new(vec![0.99; 32]);
        for step in 0..16 {
            let v = velocity(Voice::Crash, step, 16, 1.0, &mut rng);
            assert!((1..=127).contains(&v));
        }
        let mut rng = ReplaySource::new(vec![0.0; 32]);
        for step in 0..16 {
            let v = velocity(Voice::SideStick, step, 16, 0.0, &mut rng);
            assert!((1..=127).contains(&v));
        }
    }

    #[test]
    fn velocity_uses_exactly_one_draw() {
        let mut rng = ReplaySource::new(vec![0.5]);
        velocity(Voice::Kick, 0, 16, 0.5, &mut rng);
        assert_eq!(rng.draws(), 1);
    }
}
