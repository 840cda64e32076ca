//! Motif engine — extraction, variation, and recall of short fragments.
//!
//! A motif is a 2–4 cell slice of a voice's step pattern. Re-injecting a
//! stored motif (usually varied) into later bars is what keeps a generated
//! part sounding like one performer rather than unrelated bars.
//!
//! Draw order per voice per bar, fixed by contract:
//! - extraction: length draw, then start draw;
//! - recall: `should_recall` draw, variation-kind draw, injection-start
//!   draw, then the variation's own per-cell draws (sparse/dense only).

use serde::{Deserialize, Serialize};

use crate::rng::DrawSource;
use crate::voice::Voice;

use super::pattern::StepPattern;

/// How a recalled motif is transformed before injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variation {
    /// Flip every cell.
    Invert,
    /// Rotate by one position.
    Shift,
    /// Zero each hit cell with probability 0.5 (one draw per hit cell).
    Sparse,
    /// Set each rest cell with probability 0.3 (one draw per rest cell).
    Dense,
}

impl Variation {
    pub const ALL: [Variation; 4] = [
        Variation::Invert,
        Variation::Shift,
        Variation::Sparse,
        Variation::Dense,
    ];
}

/// A stored rhythmic fragment. Immutable once stored, except for recall
/// bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Motif {
    cells: Vec<bool>,
    pub source: Voice,
    pub recall_count: u32,
}

impl Motif {
    /// Copy `len` consecutive cells starting at `start`, wrapping
    /// circularly past the pattern end.
    pub fn extract(pattern: &StepPattern, start: usize, len: usize, source: Voice) -> Self {
        let cells = (0..len).map(|i| pattern.get(start + i)).collect();
        Self {
            cells,
            source,
            recall_count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Produce a varied copy. Only `Sparse` and `Dense` draw from the
    /// stream (one draw per eligible cell, in index order).
    pub fn vary(&self, kind: Variation, rng: &mut dyn DrawSource) -> Motif {
        let cells = match kind {
            Variation::Invert => self.cells.iter().map(|&c| !c).collect(),
            Variation::Shift => {
                let mut shifted = self.cells.clone();
                shifted.rotate_right(1);
                shifted
            }
            Variation::Sparse => self
                .cells
                .iter()
                .map(|&c| if c { !rng.chance(0.5) } else { c })
                .collect(),
            Variation::Dense => self
                .cells
                .iter()
                .map(|&c| if c { c } else { rng.chance(0.3) })
                .collect(),
        };
        Motif {
            cells,
            source: self.source,
            recall_count: self.recall_count,
        }
    }

    /// Overwrite `self.len()` cells of `base` starting at `start`,
    /// wrapping circularly. The rest of the base pattern is untouched.
    pub fn inject(&self, base: &mut StepPattern, start: usize) {
        for (i, &cell) in self.cells.iter().enumerate() {
            base.set(start + i, cell);
        }
    }
}

/// Recall policy: bar 0 never recalls (and draws nothing); bar 1 recalls
/// with probability 0.5; later bars with probability 0.7. One draw for
/// bars >= 1.
pub fn should_recall(bar_index: u32, rng: &mut dyn DrawSource) -> bool {
    match bar_index {
        0 => false,
        1 => rng.chance(0.5),
        _ => rng.chance(0.7),
    }
}

/// Per-run motif store, one slot per voice. Owned by the generation
/// context; reset simply by building a fresh one.
#[derive(Debug, Default)]
pub struct MotifMemory {
    stored: Vec<Motif>,
}

impl MotifMemory {
    pub fn new() -> Self {
        Self::default()
    }

    fn find(&self, voice: Voice) -> Option<usize> {
        self.stored.iter().position(|m| m.source == voice)
    }

    /// Number of motifs currently stored.
    pub fn len(&self) -> usize {
        self.stored.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stored.is_empty()
    }

    /// Run the motif step for one voice's bar pattern: extract on first
    /// sight of the voice, otherwise possibly recall a varied copy.
    pub fn apply(
        &mut self,
        voice: Voice,
        pattern: &mut StepPattern,
        bar_index: u32,
        rng: &mut dyn DrawSource,
    ) {
        let steps = pattern.len();
        if steps == 0 {
            return;
        }
        match self.find(voice) {
            None => {
                let len = 2 + rng.pick_index(3);
                let start = rng.pick_index(steps);
                self.stored
                    .push(Motif::extract(pattern, start, len, voice));
            }
            Some(slot) => {
                if !should_recall(bar_index, rng) {
                    return;
                }
                let kind = Variation::ALL[rng.pick_index(Variation::ALL.len())];
                let start = rng.pick_index(steps);
                let varied = self.stored[slot].vary(kind, rng);
                varied.inject(pattern, start);
                self.stored[slot].recall_count += 1;
            }
        }
    }
}
