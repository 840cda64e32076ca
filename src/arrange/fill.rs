//! Fill selection — tension model and the fixed fill-pattern library.
//!
//! Tension rises toward phrase boundaries and with groove complexity;
//! higher tension selects busier fills. The note tables are fixed data
//! (positions in 16th-note steps from the start of the bar; all fills
//! live in the bar's final quarter).

use crate::rng::DrawSource;
use crate::voice::Voice;

/// The four fill flavors, ordered from sparsest to busiest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillKind {
    Simple,
    Moderate,
    Complex,
    Rolls,
}

impl FillKind {
    pub const ALL: [FillKind; 4] = [
        FillKind::Simple,
        FillKind::Moderate,
        FillKind::Complex,
        FillKind::Rolls,
    ];
}

/// One note of a fill pattern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillNote {
    /// Position in 16th-note steps from the bar start (fractional for
    /// 32nd-note rolls).
    pub position: f64,
    pub voice: Voice,
    pub base_velocity: u8,
}

const fn note(position: f64, voice: Voice, base_velocity: u8) -> FillNote {
    FillNote {
        position,
        voice,
        base_velocity,
    }
}

const SIMPLE: [FillNote; 3] = [
    note(13.0, Voice::Snare, 88),
    note(14.0, Voice::Snare, 94),
    note(15.0, Voice::Crash, 108),
];

const MODERATE: [FillNote; 5] = [
    note(12.0, Voice::Snare, 85),
    note(13.0, Voice::Snare, 90),
    note(13.5, Voice::HighTom, 92),
    note(14.5, Voice::MidTom, 94),
    note(15.0, Voice::LowTom, 96),
];

const COMPLEX: [FillNote; 7] = [
    note(12.0, Voice::Snare, 88),
    note(12.5, Voice::Snare, 80),
    note(13.0, Voice::HighTom, 92),
    note(13.5, Voice::MidTom, 92),
    note(14.0, Voice::Snare, 96),
    note(14.5, Voice::LowTom, 98),
    note(15.5, Voice::Crash, 112),
];

const ROLLS: [FillNote; 9] = [
    note(13.0, Voice::Snare, 64),
    note(13.25, Voice::Snare, 70),
    note(13.5, Voice::Snare, 76),
    note(13.75, Voice::Snare, 82),
    note(14.0, Voice::Snare, 88),
    note(14.25, Voice::Snare, 94),
    note(14.5, Voice::Snare, 100),
    note(14.75, Voice::Snare, 106),
    note(15.0, Voice::Crash, 115),
];

impl FillKind {
    /// The fixed note table for this fill.
    pub fn library(self) -> &'static [FillNote] {
        match self {
            FillKind::Simple => &SIMPLE,
            FillKind::Moderate => &MODERATE,
            FillKind::Complex => &COMPLEX,
            FillKind::Rolls => &ROLLS,
        }
    }
}

/// Phrase-position bonus: tension climbs through a 4-bar phrase.
fn phrase_bonus(phrase_position: u32) -> f64 {
    match phrase_position {
        2 => 0.15,
        3 => 0.3,
        _ => 0.0,
    }
}

/// Musical tension for a bar, in `[0, 1]`. Draw-free.
pub fn tension(bar_index: u32, groove_complexity: f64, previous_density: f64) -> f64 {
    let t = 0.5
        + phrase_bonus(bar_index % 4)
        + (groove_complexity - 0.5) * 0.3
        + (previous_density - 0.5).abs() * 0.2;
    t.clamp(0.0, 1.0)
}

/// Choose the next fill flavor. The previous kind is excluded so two
/// identical fills never run back to back. The two "random of" arms each
/// consume exactly one draw; the low- and mid-tension arms are draw-free.
pub fn choose_kind(
    tension: f64,
    previous: Option<FillKind>,
    rng: &mut dyn DrawSource,
) -> FillKind {
    let candidates: Vec<FillKind> = FillKind::ALL
        .iter()
        .copied()
        .filter(|&k| Some(k) != previous)
        .collect();

    if tension < 0.3 {
        if candidates.contains(&FillKind::Simple) {
            FillKind::Simple
        } else {
            candidates[0]
        }
    } else if tension < 0.6 {
        let pool = &candidates[..2.min(candidates.len())];
        pool[rng.pick_index(pool.len())]
    } else if tension < 0.85 {
        if candidates.contains(&FillKind::Moderate) {
            FillKind::Moderate
        } else {
            candidates[0]
        }
    } else {
        let pool: Vec<FillKind> = candidates
            .iter()
            .copied()
            .filter(|&k| matches!(k, FillKind::Complex | FillKind::Rolls))
            .collect();
        pool[rng.pick_index(pool.len())]
    }
}
