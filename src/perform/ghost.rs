//! Contextual ghost notes — quiet side-stick hits placed around snare
//! hits for groove texture.
//!
//! The placement probability is a context model, not a flat rate: bar
//! endings invite ghosts, an upcoming accent invites a lead-in, sparse
//! grooves leave more room, and the final bar's ending backs off. The
//! caller's `ghost_chance` input scales the whole model.
//!
//! Draw order on the snare path: one trigger draw; on trigger a base
//! velocity draw (55–65), a jitter draw (±4), and an offset draw (0.4–0.6
//! of a step).

use crate::rng::DrawSource;

/// A ghost note to insert near a main snare hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostNote {
    pub velocity: u8,
    /// Signed tick offset from the main hit (negative = before).
    pub offset_ticks: f64,
}

/// Context for one snare hit's ghost decision.
#[derive(Debug, Clone, Copy)]
pub struct GhostContext {
    pub step: usize,
    pub steps: usize,
    pub bar_index: u32,
    pub total_bars: u32,
    /// Whole-grid density of the current bar.
    pub bar_density: f64,
    /// The caller's 0..1 master ghost knob.
    pub ghost_chance: f64,
}

fn next_step_accented(step: usize, steps: usize) -> bool {
    let per_beat = (steps / 4).max(1);
    (step + 1) % per_beat == 0
}

/// Decide whether to place a ghost around this snare hit.
pub fn maybe_ghost(
    ctx: GhostContext,
    step_ticks: f64,
    rng: &mut dyn DrawSource,
) -> Option<GhostNote> {
    let ending = ctx.step + 4 >= ctx.steps;
    let accent_ahead = next_step_accented(ctx.step, ctx.steps);
    let final_ending = ctx.bar_index + 1 == ctx.total_bars && ctx.step + 2 >= ctx.steps;
    let sparse = ctx.bar_density < 0.5;

    let p = 0.15
        + if ending { 0.25 } else { 0.0 }
        + if accent_ahead { 0.20 } else { 0.0 }
        - if final_ending { 0.15 } else { 0.0 }
        + if sparse { 0.15 } else { 0.0 };

    if !rng.chance(p * ctx.ghost_chance) {
        return None;
    }

    let base = rng.range_f64(55.0, 65.0);
    let jitter = rng.range_f64(-4.0, 4.0);
    let magnitude = rng.range_f64(0.4, 0.6) * step_ticks;
    // Lead into an upcoming accent from behind the main hit; otherwise
    // tuck the ghost in front of it.
    let offset = if accent_ahead { magnitude } else { -magnitude };

    Some(GhostNote {
        velocity: ((base + jitter).round() as i32).clamp(1, 127) as u8,
        offset_ticks: offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ReplaySource;

    fn ctx(step: usize) -> GhostContext {
        GhostContext {
            step,
            steps: 16,
            bar_index: 1,
            total_bars: 4,
            bar_density: 0.6,
            ghost_chance: 1.0,
        }
    }

    #[test]
    fn miss_is_one_draw() {
        let mut rng = ReplaySource::new(vec![0.99]);
        assert_eq!(maybe_ghost(ctx(5), 240.0, &mut rng), None);
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn trigger_draws_velocity_jitter_and_offset() {
        let mut rng = ReplaySource::new(vec![0.0, 0.5, 0.5, 0.0]);
        let ghost = maybe_ghost(ctx(5), 240.0, &mut rng).unwrap();
        assert_eq!(rng.draws(), 4);
        assert_eq!(ghost.velocity, 60);
        // Step 5 is mid-bar with no accent ahead: ghost leads the hit.
        assert!((ghost.offset_ticks - -96.0).abs() < 1e-9);
    }

    #[test]
    fn accent_ahead_places_the_ghost_after() {
        // Step 3: step 4 is a beat boundary on a 16-grid.
        let mut rng = ReplaySource::new(vec![0.0, 0.5, 0.5, 0.5]);
        let ghost = maybe_ghost(ctx(3), 240.0, &mut rng).unwrap();
        assert!(ghost.offset_ticks > 0.0);
    }

    #[test]
    fn bar_ending_raises_the_probability() {
        // p mid-bar, no accent ahead, dense bar: 0.15.
        // p at step 13 (ending, accent at 16? no; 14 % 4 != 0): 0.40.
        let mut rng = ReplaySource::new(vec![0.3, 0.5, 0.5, 0.5]);
        assert!(maybe_ghost(ctx(13), 240.0, &mut rng).is_some());
        let mut rng = ReplaySource::new(vec![0.3]);
        assert!(maybe_ghost(ctx(5), 240.0, &mut rng).is_none());
    }

    #[test]
    fn ghost_chance_scales_the_model() {
        let mut zero = ctx(13);
        zero.ghost_chance = 0.0;
        let mut rng = ReplaySource::new(vec![0.0]);
        assert_eq!(maybe_ghost(zero, 240.0, &mut rng), None);
    }

    #[test]
    fn final_bar_ending_backs_off() {
        let mut last = ctx(15);
        last.bar_index = 3;
        let regular = ctx(15);
        // Same draw fails on the final bar's reduced probability but
        // passes mid-song. Ending+accent-ahead: p = 0.60 vs 0.45.
        let mut rng = ReplaySource::new(vec![0.5, 0.5, 0.5, 0.5]);
        assert!(maybe_ghost(regular, 240.0, &mut rng).is_some());
        let mut rng = ReplaySource::new(vec![0.5]);
        assert!(maybe_ghost(last, 240.0, &mut rng).is_none());
    }
}
