//! Euclidean rhythm generation via Bjorklund's bracket-merging algorithm.
//!
//! Distributes `hits` onsets as evenly as possible across `steps` cells.
//! The construction mirrors the Euclidean GCD remainder sequence: start
//! with `hits` one-brackets and `steps - hits` zero-brackets, repeatedly
//! append one small bracket to each large bracket, and stop once at most
//! one small bracket remains. Entirely draw-free; the RNG never sees this.

use super::pattern::StepPattern;

/// Generate the Euclidean pattern for `(steps, hits)`, left-rotated by
/// `rotation % steps`.
///
/// `hits == 0` yields all rests and `hits >= steps` all hits, without
/// recursion. `steps == 0` is a contract violation guarded by the engine;
/// here it is only a debug assertion.
pub fn generate(steps: usize, hits: usize, rotation: usize) -> StepPattern {
    debug_assert!(steps > 0, "euclid::generate called with zero steps");
    if steps == 0 {
        return StepPattern::rests(0);
    }
    if hits == 0 {
        return StepPattern::rests(steps);
    }
    if hits >= steps {
        return StepPattern::from_cells(vec![true; steps]);
    }

    let mut large: Vec<Vec<bool>> = vec![vec![true]; hits];
    let mut small: Vec<Vec<bool>> = vec![vec![false]; steps - hits];

    while small.len() > 1 {
        let pairs = large.len().min(small.len());
        let mut merged = Vec::with_capacity(pairs);
        for i in 0..pairs {
            let mut bracket = std::mem::take(&mut large[i]);
            bracket.extend_from_slice(&small[i]);
            merged.push(bracket);
        }
        let leftover_large: Vec<Vec<bool>> = large.split_off(pairs);
        let leftover_small: Vec<Vec<bool>> = small.split_off(pairs);
        large = merged;
        small = if leftover_large.is_empty() {
            leftover_small
        } else {
            leftover_large
        };
    }

    let mut cells = Vec::with_capacity(steps);
    for bracket in large.into_iter().chain(small) {
        cells.extend(bracket);
    }

    let mut pattern = StepPattern::from_cells(cells);
    pattern.rotate_left(rotation % steps);
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(p: &StepPattern) -> Vec<u8> {
        p.cells().iter().map(|&c| c as u8).collect()
    }

    #[test]
    fn tresillo() {
        assert_eq!(bits(&generate(8, 3, 0)), vec![1, 0, 0, 1, 0, 0, 1, 0]);
    }

    #[test]
    fn exact_hit_counts() {
        for steps in 1..=24 {
            for hits in 0..=steps {
                let p = generate(steps, hits, 0);
                assert_eq!(p.len(), steps);
                assert_eq!(p.hit_count(), hits, "steps={steps} hits={hits}");
            }
        }
    }

    #[test]
    fn zero_hits_all_rests() {
        assert_eq!(generate(5, 0, 3).hit_count(), 0);
    }

    #[test]
    fn saturated_all_hits() {
        assert_eq!(generate(5, 5, 2).hit_count(), 5);
        assert_eq!(generate(5, 9, 0).hit_count(), 5);
    }

    #[test]
    fn rotation_is_a_circular_shift() {
        for rotation in 0..16 {
            let base = generate(16, 5, 0);
            let rotated = generate(16, 5, rotation);
            for i in 0..16 {
                assert_eq!(rotated.get(i), base.get(i + rotation));
            }
        }
    }

    #[test]
    fn classic_patterns() {
        // Cinquillo.
        assert_eq!(bits(&generate(8, 5, 0)), vec![1, 0, 1, 1, 0, 1, 1, 0]);
        // Four-on-the-floor.
        assert_eq!(
            bits(&generate(16, 4, 0)),
            vec![1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 0]
        );
    }
}
