//! Step grids and per-voice rhythm configuration.

use serde::{Deserialize, Serialize};

/// Euclidean configuration for one voice: `hits` onsets spread across
/// `steps` cells, rotated left by `rotation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceConfig {
    pub steps: usize,
    pub hits: usize,
    pub rotation: usize,
}

impl VoiceConfig {
    pub fn new(steps: usize, hits: usize, rotation: usize) -> Self {
        Self {
            steps,
            hits,
            rotation,
        }
    }

    /// Clamp `hits` into `0..=steps`. Over-full configs are a caller
    /// mistake we repair rather than reject.
    pub fn clamped(self) -> Self {
        Self {
            hits: self.hits.min(self.steps),
            ..self
        }
    }
}

/// One bar of hit/rest cells for a single voice.
///
/// Indexing is circular everywhere: motif windows and injections may wrap
/// past the bar end, so `get`/`set` reduce indices modulo the length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepPattern {
    cells: Vec<bool>,
}

impl StepPattern {
    /// All-rest pattern of the given length.
    pub fn rests(len: usize) -> Self {
        Self {
            cells: vec![false; len],
        }
    }

    pub fn from_cells(cells: Vec<bool>) -> Self {
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Circular read.
    pub fn get(&self, index: usize) -> bool {
        self.cells[index % self.cells.len()]
    }

    /// Circular write.
    pub fn set(&mut self, index: usize, value: bool) {
        let len = self.cells.len();
        self.cells[index % len] = value;
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Number of active cells.
    pub fn hit_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Fraction of active cells in `[0, 1]`.
    pub fn density(&self) -> f64 {
        if self.cells.is_empty() {
            0.0
        } else {
            self.hit_count() as f64 / self.cells.len() as f64
        }
    }

    /// Rotate the whole pattern left by `n` positions.
    pub fn rotate_left(&mut self, n: usize) {
        if !self.cells.is_empty() {
            let n = n % self.cells.len();
            self.cells.rotate_left(n);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circular_get_and_set_wrap() {
        let mut p = StepPattern::rests(4);
        p.set(5, true);
        assert!(p.get(1));
        assert!(p.get(9));
    }

    #[test]
    fn density_counts_hits() {
        let p = StepPattern::from_cells(vec![true, false, true, false]);
        assert_eq!(p.hit_count(), 2);
        assert!((p.density() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rotate_left_shifts_cells() {
        let mut p = StepPattern::from_cells(vec![true, false, false, false]);
        p.rotate_left(1);
        assert_eq!(p.cells(), &[false, false, false, true]);
    }

    #[test]
    fn clamped_limits_hits_to_steps() {
        let c = VoiceConfig::new(8, 12, 0).clamped();
        assert_eq!(c.hits, 8);
        let ok = VoiceConfig::new(8, 3, 2).clamped();
        assert_eq!(ok.hits, 3);
    }
}
