//! Per-bar pattern assembly.
//!
//! Lowers each voice's configuration into a concrete step grid for one
//! bar: Euclidean base, section density, motif step, then kick/snare
//! call-and-response coupling. Voices are processed in [`Voice::ORDER`],
//! which fixes the RNG draw sequence.

use crate::arrange::section::{apply_density, SectionLabel};
use crate::rng::DrawSource;
use crate::voice::Voice;

use super::euclid;
use super::motif::MotifMemory;
use super::pattern::{StepPattern, VoiceConfig};

/// Maximum snare hits added per bar by call-and-response.
const MAX_RESPONSES: usize = 2;

/// How far (in steps) a snare response trails a kick call.
const RESPONSE_LAG: usize = 2;

/// The assembled step grids for one bar, in canonical voice order.
#[derive(Debug, Clone)]
pub struct BarGrid {
    patterns: Vec<(Voice, StepPattern)>,
}

impl BarGrid {
    pub fn voices(&self) -> impl Iterator<Item = (Voice, &StepPattern)> {
        self.patterns.iter().map(|(v, p)| (*v, p))
    }

    pub fn pattern(&self, voice: Voice) -> Option<&StepPattern> {
        self.patterns
            .iter()
            .find(|(v, _)| *v == voice)
            .map(|(_, p)| p)
    }

    /// Fraction of active cells across all voices, in `[0, 1]`. Feeds the
    /// ghost-note context and the next bar's fill tension.
    pub fn density(&self) -> f64 {
        let cells: usize = self.patterns.iter().map(|(_, p)| p.len()).sum();
        if cells == 0 {
            return 0.0;
        }
        let hits: usize = self.patterns.iter().map(|(_, p)| p.hit_count()).sum();
        hits as f64 / cells as f64
    }
}

/// Build the step grids for one bar.
///
/// `voices` must already be in canonical order and hold clamped configs;
/// the engine guarantees both.
pub fn assemble_bar(
    voices: &[(Voice, VoiceConfig)],
    label: SectionLabel,
    bar_index: u32,
    motifs: &mut MotifMemory,
    rng: &mut dyn DrawSource,
) -> BarGrid {
    let mut patterns = Vec::with_capacity(voices.len());
    for &(voice, config) in voices {
        let shaped = apply_density(config, label);
        let mut pattern = euclid::generate(shaped.steps, shaped.hits, shaped.rotation);
        motifs.apply(voice, &mut pattern, bar_index, rng);
        patterns.push((voice, pattern));
    }

    let mut grid = BarGrid { patterns };
    couple_call_response(&mut grid, label, rng);
    grid
}

/// Kick/snare call-and-response: where the kick lands and the snare is
/// silent two steps later, sometimes answer. Candidates are scanned in
/// ascending step order (one draw each), capped at [`MAX_RESPONSES`].
/// Requires both voices on equal-length grids.
fn couple_call_response(grid: &mut BarGrid, label: SectionLabel, rng: &mut dyn DrawSource) {
    let complexity = label.characteristics().groove_complexity;
    let kick = match grid.pattern(Voice::Kick) {
        Some(p) => p.clone(),
        None => return,
    };
    let snare_len = match grid.pattern(Voice::Snare) {
        Some(p) if p.len() == kick.len() => p.len(),
        _ => return,
    };

    let mut added = 0;
    for step in 0..snare_len {
        if added >= MAX_RESPONSES {
            break;
        }
        let response_step = (step + RESPONSE_LAG) % snare_len;
        let snare = grid
            .patterns
            .iter()
            .find(|(v, _)| *v == Voice::Snare)
            .map(|(_, p)| p)
            .expect("snare checked above");
        if !kick.get(step) || snare.get(response_step) {
            continue;
        }
        if rng.chance(0.25 * complexity) {
            for (v, p) in grid.patterns.iter_mut() {
                if *v == Voice::Snare {
                    p.set(response_step, true);
                }
            }
            added += 1;
        }
    }
}
