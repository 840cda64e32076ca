//! The surprise engine — controlled human imperfection.
//!
//! Each note gets a small chance of a deliberate "mistake": a dropped
//! hit, a displaced hit, a snare pre-ghost, an open-hat substitution, or
//! a grace note. Interior bars are slightly more error-prone; strong
//! downbeats are protected.
//!
//! Draw order: one trigger draw; on trigger one variant pick; the
//! displace variant draws its tick offset immediately. Variants that only
//! apply to certain voices still consume their pick draw on other voices
//! and degrade to a no-op, keeping the draw sequence voice-independent.

use crate::rng::DrawSource;

/// What the surprise engine decided for a note.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Surprise {
    /// Omit the note entirely.
    Drop,
    /// Shift the note and play it slightly harder.
    Displace { ticks: f64 },
    /// Snare only: sneak a quiet side-stick in just before the hit.
    PreGhost,
    /// Hats only: substitute an open hat with its longer ring.
    OpenHatSub,
    /// Add a quieter grace note 15 ticks ahead of the main hit.
    Grace,
}

/// Extra trigger probability on interior bars (mistakes creep in once the
/// opening is settled and before the ending focuses attention).
const INTERIOR_BONUS: f64 = 0.03;

/// Base per-note trigger probability.
const BASE_CHANCE: f64 = 0.05;

/// Downbeat protection factor.
const DOWNBEAT_FACTOR: f64 = 0.3;

/// Run the surprise check for one note.
pub fn check_surprise(
    bar_index: u32,
    total_bars: u32,
    step: usize,
    steps: usize,
    rng: &mut dyn DrawSource,
) -> Option<Surprise> {
    let interior = bar_index >= 2 && bar_index + 2 < total_bars;
    let mut p = BASE_CHANCE + if interior { INTERIOR_BONUS } else { 0.0 };

    let per_beat = (steps / 4).max(1);
    if step % per_beat == 0 {
        p *= DOWNBEAT_FACTOR;
    }

    if !rng.chance(p) {
        return None;
    }

    Some(match rng.pick_index(5) {
        0 => Surprise::Drop,
        1 => Surprise::Displace {
            ticks: rng.range_f64(-20.0, 30.0),
        },
        2 => Surprise::PreGhost,
        3 => Surprise::OpenHatSub,
        _ => Surprise::Grace,
    })
}
