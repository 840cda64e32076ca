//! The genre blueprint tables.
//!
//! Core hits are the genre's identity and always sound; variable rules
//! are the per-generation character. Positions are 16th-note steps
//! (fractional = 32nds). New genres are new tables, not new code.

use crate::voice::Voice;

use super::{CoreHit, GenreBlueprint, VariableRule};

const fn hit(voice: Voice, step: f64, lo: u8, hi: u8) -> CoreHit {
    CoreHit {
        voice,
        step,
        velocity: (lo, hi),
    }
}

const OFFBEATS: [f64; 4] = [2.0, 6.0, 10.0, 14.0];
const ODD_16THS: [f64; 8] = [1.0, 3.0, 5.0, 7.0, 9.0, 11.0, 13.0, 15.0];
const LATE_32ND_ROLL: [f64; 6] = [13.0, 13.5, 14.0, 14.5, 15.0, 15.5];
const TRAP_HAT_GRID: [f64; 12] = [
    0.0, 1.5, 3.0, 4.0, 5.5, 7.0, 8.0, 9.0, 10.5, 12.0, 13.5, 15.0,
];
const HALF_BEATS: [f64; 8] = [0.0, 2.0, 4.0, 6.0, 8.0, 10.0, 12.0, 14.0];
const DNB_HAT_GRID: [f64; 8] = [1.0, 3.0, 5.0, 7.0, 9.0, 11.0, 13.0, 15.0];

static HOUSE: GenreBlueprint = GenreBlueprint {
    core: &[
        hit(Voice::Kick, 0.0, 100, 110),
        hit(Voice::Kick, 4.0, 100, 110),
        hit(Voice::Kick, 8.0, 100, 110),
        hit(Voice::Kick, 12.0, 100, 110),
        hit(Voice::OpenHat, 2.0, 80, 90),
        hit(Voice::OpenHat, 6.0, 80, 90),
        hit(Voice::OpenHat, 10.0, 80, 90),
        hit(Voice::OpenHat, 14.0, 80, 90),
    ],
    rules: &[
        VariableRule {
            name: "clap-layer",
            probability: 0.8,
            step_probability: 0.9,
            positions: &[4.0, 12.0],
            voices: &[Voice::Snare, Voice::SideStick],
            velocity: (92, 104),
        },
        VariableRule {
            name: "shaker-16ths",
            probability: 0.55,
            step_probability: 0.6,
            positions: &ODD_16THS,
            voices: &[Voice::ClosedHat],
            velocity: (58, 72),
        },
        VariableRule {
            name: "ride-layer",
            probability: 0.3,
            step_probability: 0.5,
            positions: &HALF_BEATS,
            voices: &[Voice::Ride],
            velocity: (66, 80),
        },
    ],
};

static TECHNO: GenreBlueprint = GenreBlueprint {
    core: &[
        hit(Voice::Kick, 0.0, 110, 120),
        hit(Voice::Kick, 4.0, 110, 120),
        hit(Voice::Kick, 8.0, 110, 120),
        hit(Voice::Kick, 12.0, 110, 120),
        hit(Voice::ClosedHat, 2.0, 70, 84),
        hit(Voice::ClosedHat, 6.0, 70, 84),
        hit(Voice::ClosedHat, 10.0, 70, 84),
        hit(Voice::ClosedHat, 14.0, 70, 84),
    ],
    rules: &[
        VariableRule {
            name: "rumble-kick",
            probability: 0.45,
            step_probability: 0.4,
            positions: &[3.0, 7.0, 11.0, 15.0],
            voices: &[Voice::Kick],
            velocity: (60, 74),
        },
        VariableRule {
            name: "offbeat-open-hat",
            probability: 0.5,
            step_probability: 0.7,
            positions: &OFFBEATS,
            voices: &[Voice::OpenHat],
            velocity: (74, 88),
        },
        VariableRule {
            name: "tom-pulse",
            probability: 0.35,
            step_probability: 0.45,
            positions: &ODD_16THS,
            voices: &[Voice::LowTom, Voice::MidTom],
            velocity: (64, 80),
        },
        VariableRule {
            name: "snare-build",
            probability: 0.2,
            step_probability: 0.8,
            positions: &LATE_32ND_ROLL,
            voices: &[Voice::Snare],
            velocity: (56, 90),
        },
    ],
};

static TRAP: GenreBlueprint = GenreBlueprint {
    core: &[
        hit(Voice::Kick, 0.0, 108, 118),
        hit(Voice::Kick, 7.0, 100, 112),
        hit(Voice::Kick, 10.0, 100, 112),
        hit(Voice::Snare, 8.0, 102, 114),
    ],
    rules: &[
        VariableRule {
            name: "hat-grid",
            probability: 0.95,
            step_probability: 0.85,
            positions: &TRAP_HAT_GRID,
            voices: &[Voice::ClosedHat],
            velocity: (62, 80),
        },
        VariableRule {
            name: "hat-roll",
            probability: 0.5,
            step_probability: 0.75,
            positions: &LATE_32ND_ROLL,
            voices: &[Voice::ClosedHat],
            velocity: (54, 72),
        },
        VariableRule {
            name: "extra-808",
            probability: 0.4,
            step_probability: 0.35,
            positions: &[3.0, 5.0, 13.0, 14.0],
            voices: &[Voice::Kick],
            velocity: (92, 106),
        },
        VariableRule {
            name: "open-hat-accent",
            probability: 0.3,
            step_probability: 0.6,
            positions: &[6.0, 14.0],
            voices: &[Voice::OpenHat],
            velocity: (76, 90),
        },
    ],
};

static DRUM_AND_BASS: GenreBlueprint = GenreBlueprint {
    core: &[
        hit(Voice::Kick, 0.0, 106, 116),
        hit(Voice::Kick, 10.0, 100, 112),
        hit(Voice::Snare, 4.0, 104, 116),
        hit(Voice::Snare, 12.0, 104, 116),
    ],
    rules: &[
        VariableRule {
            name: "hat-run",
            probability: 0.85,
            step_probability: 0.7,
            positions: &DNB_HAT_GRID,
            voices: &[Voice::ClosedHat],
            velocity: (58, 76),
        },
        VariableRule {
            name: "ghost-snare",
            probability: 0.6,
            step_probability: 0.3,
            positions: &[3.0, 7.0, 11.0, 15.0],
            voices: &[Voice::SideStick],
            velocity: (44, 60),
        },
        VariableRule {
            name: "break-chop",
            probability: 0.4,
            step_probability: 0.5,
            positions: &[5.5, 6.0, 13.5, 14.0],
            voices: &[Voice::Snare, Voice::MidTom],
            velocity: (70, 92),
        },
        VariableRule {
            name: "ride-wash",
            probability: 0.25,
            step_probability: 0.55,
            positions: &HALF_BEATS,
            voices: &[Voice::Ride],
            velocity: (60, 76),
        },
    ],
};

static HIP_HOP: GenreBlueprint = GenreBlueprint {
    core: &[
        hit(Voice::Kick, 0.0, 102, 112),
        hit(Voice::Kick, 7.5, 94, 106),
        hit(Voice::Snare, 4.0, 100, 112),
        hit(Voice::Snare, 12.0, 100, 112),
    ],
    rules: &[
        VariableRule {
            name: "hat-8ths",
            probability: 0.9,
            step_probability: 0.85,
            positions: &HALF_BEATS,
            voices: &[Voice::ClosedHat],
            velocity: (62, 78),
        },
        VariableRule {
            name: "hat-16th-fill",
            probability: 0.45,
            step_probability: 0.4,
            positions: &ODD_16THS,
            voices: &[Voice::ClosedHat],
            velocity: (52, 66),
        },
        VariableRule {
            name: "lazy-kick",
            probability: 0.5,
            step_probability: 0.45,
            positions: &[9.5, 11.0, 14.0],
            voices: &[Voice::Kick],
            velocity: (88, 102),
        },
        VariableRule {
            name: "ghost-stick",
            probability: 0.4,
            step_probability: 0.35,
            positions: &[2.5, 6.5, 10.5],
            voices: &[Voice::SideStick],
            velocity: (42, 58),
        },
    ],
};

pub(super) fn blueprint(genre: super::Genre) -> &'static GenreBlueprint {
    match genre {
        super::Genre::House => &HOUSE,
        super::Genre::Techno => &TECHNO,
        super::Genre::Trap => &TRAP,
        super::Genre::DrumAndBass => &DRUM_AND_BASS,
        super::Genre::HipHop => &HIP_HOP,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_stay_inside_the_bar() {
        for g in crate::genre::Genre::ALL {
            let bp = blueprint(g);
            for h in bp.core {
                assert!((0.0..16.0).contains(&h.step), "{g} core");
            }
            for r in bp.rules {
                for &p in r.positions {
                    assert!((0.0..16.0).contains(&p), "{g} rule {}", r.name);
                }
            }
        }
    }

    #[test]
    fn trap_identity_hits_are_in_the_core() {
        let core = &TRAP.core;
        assert!(core
            .iter()
            .any(|h| h.voice == Voice::Kick && h.step == 0.0));
        assert!(core
            .iter()
            .any(|h| h.voice == Voice::Snare && h.step == 8.0));
    }

    #[test]
    fn four_on_the_floor_genres_keep_all_four_kicks() {
        for bp in [&HOUSE, &TECHNO] {
            for step in [0.0, 4.0, 8.0, 12.0] {
                assert!(bp
                    .core
                    .iter()
                    .any(|h| h.voice == Voice::Kick && h.step == step));
            }
        }
    }
}
