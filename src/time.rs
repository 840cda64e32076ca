//! Musical time representation using integer ticks.
//!
//! Uses 960 PPQN (Pulses Per Quarter Note) so that common subdivisions
//! (8ths, 16ths, 32nds, triplets) land on exact integer ticks. Generated
//! events carry raw tick offsets from the start of the pattern; conversion
//! to wall-clock seconds happens only at the limb-simulation boundary,
//! where physical strike intervals are specified in seconds.

/// Ticks per quarter note (beat). 960 divides cleanly by 2, 3, 4, 5, 6, 8,
/// 10, 12, 15, 16, 20, 24, 32, etc.
pub const TICKS_PER_BEAT: u64 = 960;

/// Fixed time signature: 4 beats per bar.
pub const BEATS_PER_BAR: u64 = 4;

/// Ticks in one bar.
pub const TICKS_PER_BAR: u64 = TICKS_PER_BEAT * BEATS_PER_BAR;

/// Tick offset of the start of a bar.
pub fn bar_start(bar: u32) -> u64 {
    bar as u64 * TICKS_PER_BAR
}

/// Width of one grid step in ticks, for a bar divided into `steps` cells.
///
/// Fractional for odd divisions (e.g. 12-step bars); callers round once,
/// when a final tick position is fixed.
pub fn step_ticks(steps: usize) -> f64 {
    TICKS_PER_BAR as f64 / steps as f64
}

/// Tick position of `step` within `bar`, as a float (not yet rounded).
pub fn step_position(bar: u32, step: usize, steps: usize) -> f64 {
    bar_start(bar) as f64 + step as f64 * step_ticks(steps)
}

/// Convert a tick position to seconds at the given tempo.
pub fn ticks_to_seconds(ticks: f64, bpm: f64) -> f64 {
    ticks * 60.0 / (bpm * TICKS_PER_BEAT as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn sixteen_step_grid_is_240_ticks_per_step() {
        assert_approx_eq!(step_ticks(16), 240.0);
    }

    #[test]
    fn bar_starts_advance_by_whole_bars() {
        assert_eq!(bar_start(0), 0);
        assert_eq!(bar_start(3), 3 * 3840);
    }

    #[test]
    fn seconds_conversion_at_120_bpm() {
        // One beat = 0.5s at 120 BPM.
        assert_approx_eq!(ticks_to_seconds(960.0, 120.0), 0.5);
        assert_approx_eq!(ticks_to_seconds(240.0, 120.0), 0.125);
    }

    #[test]
    fn step_position_combines_bar_and_step() {
        assert_approx_eq!(step_position(1, 4, 16), 3840.0 + 4.0 * 240.0);
    }
}
