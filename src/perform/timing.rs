//! Swing and microtiming — sub-step offsets that give push/pull feel.

use crate::rng::DrawSource;
use crate::voice::Voice;

/// Deterministic swing displacement in ticks. Odd-numbered steps are
/// delayed by up to a third of a step at 100% swing; even steps and zero
/// swing stay put. Draw-free.
pub fn swing_offset(step: usize, step_ticks: f64, swing_percent: f64) -> f64 {
    if step % 2 == 1 {
        swing_percent / 100.0 * step_ticks / 3.0
    } else {
        0.0
    }
}

/// Random microtiming offset in ticks.
///
/// High intensity rushes (offsets biased early), low intensity drags,
/// middling intensity wobbles symmetrically. Hat voices add an extra
/// looseness draw; kick and snare tighten the result by 0.6 with no
/// extra draw. One draw, plus one more for hats.
pub fn microtiming(voice: Voice, intensity: f64, rng: &mut dyn DrawSource) -> f64 {
    let mut offset = if intensity > 0.7 {
        rng.range_f64(-8.0, 2.0)
    } else if intensity < 0.3 {
        rng.range_f64(-2.0, 8.0)
    } else {
        rng.range_f64(-5.0, 5.0)
    };
    if voice.is_hat() {
        offset += rng.range_f64(-3.0, 3.0);
    }
    if voice.is_backbone() {
        offset *= 0.6;
    }
    offset
}
