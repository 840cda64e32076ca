//! Genre blueprint engine — the alternative, template-driven generation
//! path.
//!
//! Each genre is data, not code: a set of core hits that must always be
//! present (they are what makes the genre recognizable) plus an ordered
//! list of variable-element rules resampled every generation. One generic
//! executor interprets every genre, so adding a genre means adding a
//! table.
//!
//! Draw order per measure, fixed by contract: core hits in declared order
//! (one velocity draw each, plus a hand draw where the limb is not
//! fixed), then each rule in declared order (one gate draw; per position
//! one step draw; per emitted note one voice pick when the rule offers
//! several, one velocity draw, plus any hand draw).

mod library;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::event::NoteEvent;
use crate::perform::limb::{assign_limb, LimbTracker};
use crate::rng::DrawSource;
use crate::time;
use crate::voice::Voice;

/// The supported genres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Genre {
    House,
    Techno,
    Trap,
    DrumAndBass,
    HipHop,
}

impl Genre {
    pub const ALL: [Genre; 5] = [
        Genre::House,
        Genre::Techno,
        Genre::Trap,
        Genre::DrumAndBass,
        Genre::HipHop,
    ];

    /// The read-only blueprint for this genre.
    pub fn blueprint(self) -> &'static GenreBlueprint {
        library::blueprint(self)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Genre::House => "house",
            Genre::Techno => "techno",
            Genre::Trap => "trap",
            Genre::DrumAndBass => "drum-and-bass",
            Genre::HipHop => "hip-hop",
        };
        f.write_str(name)
    }
}

impl FromStr for Genre {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "house" => Ok(Genre::House),
            "techno" => Ok(Genre::Techno),
            "trap" => Ok(Genre::Trap),
            "drum-and-bass" | "dnb" => Ok(Genre::DrumAndBass),
            "hip-hop" | "hiphop" => Ok(Genre::HipHop),
            other => Err(GenerateError::UnknownGenre(other.to_string())),
        }
    }
}

/// A fixed hit the genre always plays.
#[derive(Debug, Clone, Copy)]
pub struct CoreHit {
    pub voice: Voice,
    /// Position in 16th-note steps from the bar start.
    pub step: f64,
    /// Inclusive velocity range; one draw per emission.
    pub velocity: (u8, u8),
}

/// A probabilistic layer: gate the whole rule, then gate each position.
#[derive(Debug, Clone, Copy)]
pub struct VariableRule {
    pub name: &'static str,
    /// Chance the rule participates in this measure at all.
    pub probability: f64,
    /// Per-position chance once the rule is active.
    pub step_probability: f64,
    /// Positions in 16th-note steps (fractional for 32nd rolls).
    pub positions: &'static [f64],
    /// Candidate voices; a pick draw happens only when there is a choice.
    pub voices: &'static [Voice],
    pub velocity: (u8, u8),
}

/// A genre's complete read-only configuration.
#[derive(Debug, Clone, Copy)]
pub struct GenreBlueprint {
    pub core: &'static [CoreHit],
    pub rules: &'static [VariableRule],
}

fn draw_velocity(range: (u8, u8), rng: &mut dyn DrawSource) -> u8 {
    let v = rng.range_f64(range.0 as f64, range.1 as f64 + 1.0);
    (v as i32).clamp(1, 127) as u8
}

#[allow(clippy::too_many_arguments)]
fn emit(
    voice: Voice,
    bar: u32,
    step: f64,
    velocity: u8,
    bpm: f64,
    limbs: &mut LimbTracker,
    rng: &mut dyn DrawSource,
    out: &mut Vec<NoteEvent>,
) {
    let tick = time::bar_start(bar) as f64 + step * time::step_ticks(16);
    let tick = tick.round().max(0.0) as u64;
    let limb = assign_limb(voice, rng);
    if limbs.try_strike(limb, voice, time::ticks_to_seconds(tick as f64, bpm)) {
        out.push(NoteEvent::at(voice, tick, velocity, limb));
    }
}

/// Render one measure of a genre blueprint: all core hits, then every
/// variable rule in order.
pub fn render_measure(
    blueprint: &GenreBlueprint,
    bar: u32,
    bpm: f64,
    limbs: &mut LimbTracker,
    rng: &mut dyn DrawSource,
    out: &mut Vec<NoteEvent>,
) {
    for hit in blueprint.core {
        let velocity = draw_velocity(hit.velocity, rng);
        emit(hit.voice, bar, hit.step, velocity, bpm, limbs, rng, out);
    }

    for rule in blueprint.rules {
        if !rng.chance(rule.probability) {
            continue;
        }
        for &position in rule.positions {
            if !rng.chance(rule.step_probability) {
                continue;
            }
            let voice = if rule.voices.len() > 1 {
                rule.voices[rng.pick_index(rule.voices.len())]
            } else {
                rule.voices[0]
            };
            let velocity = draw_velocity(rule.velocity, rng);
            emit(voice, bar, position, velocity, bpm, limbs, rng, out);
        }
    }
}
