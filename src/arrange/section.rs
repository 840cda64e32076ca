//! Section planning — maps bar indices to song sections and the density,
//! dynamics, fill, and complexity modifiers that shape each section.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::rhythm::pattern::VoiceConfig;

/// The five song-section labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionLabel {
    Intro,
    Verse,
    Chorus,
    Bridge,
    Outro,
}

/// How bars get their section labels: automatically from position, or a
/// single fixed label for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionMode {
    Auto,
    Fixed(SectionLabel),
}

/// The modifier bundle attached to a section label. Values are a fixed
/// table; they were tuned by ear and are preserved as-is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionCharacteristics {
    /// Multiplier on each voice's Euclidean hit count.
    pub density_multiplier: f64,
    /// Added (after scaling) to note intensity; roughly a velocity bias.
    pub dynamics_offset: f64,
    /// Base probability of inserting a fill in a bar of this section.
    pub fill_probability: f64,
    /// 0..1 knob feeding call-and-response coupling and fill tension.
    pub groove_complexity: f64,
}

impl SectionLabel {
    pub fn characteristics(self) -> SectionCharacteristics {
        match self {
            SectionLabel::Intro => SectionCharacteristics {
                density_multiplier: 0.6,
                dynamics_offset: -15.0,
                fill_probability: 0.2,
                groove_complexity: 0.5,
            },
            SectionLabel::Verse => SectionCharacteristics {
                density_multiplier: 0.75,
                dynamics_offset: -5.0,
                fill_probability: 0.3,
                groove_complexity: 0.7,
            },
            SectionLabel::Chorus => SectionCharacteristics {
                density_multiplier: 1.2,
                dynamics_offset: 5.0,
                fill_probability: 0.5,
                groove_complexity: 0.9,
            },
            SectionLabel::Bridge => SectionCharacteristics {
                density_multiplier: 0.85,
                dynamics_offset: 0.0,
                fill_probability: 0.4,
                groove_complexity: 0.8,
            },
            SectionLabel::Outro => SectionCharacteristics {
                density_multiplier: 0.5,
                dynamics_offset: -20.0,
                fill_probability: 0.1,
                groove_complexity: 0.4,
            },
        }
    }
}

impl fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionLabel::Intro => "intro",
            SectionLabel::Verse => "verse",
            SectionLabel::Chorus => "chorus",
            SectionLabel::Bridge => "bridge",
            SectionLabel::Outro => "outro",
        };
        f.write_str(name)
    }
}

impl FromStr for SectionLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "intro" => Ok(SectionLabel::Intro),
            "verse" => Ok(SectionLabel::Verse),
            "chorus" => Ok(SectionLabel::Chorus),
            "bridge" => Ok(SectionLabel::Bridge),
            "outro" => Ok(SectionLabel::Outro),
            other => Err(format!("unknown section: {other}")),
        }
    }
}

/// Section label for a bar. Automatic mode splits the run into
/// intro / verse / chorus / bridge / outro by position; the boundary
/// checks run in that order, so very short runs degrade gracefully.
pub fn label_for(bar_index: u32, total_bars: u32, mode: SectionMode) -> SectionLabel {
    match mode {
        SectionMode::Fixed(label) => label,
        SectionMode::Auto => {
            let third = total_bars / 3;
            if bar_index < 2 {
                SectionLabel::Intro
            } else if bar_index < third {
                SectionLabel::Verse
            } else if bar_index < 2 * third {
                SectionLabel::Chorus
            } else if bar_index + 2 < total_bars {
                SectionLabel::Bridge
            } else {
                SectionLabel::Outro
            }
        }
    }
}

/// Apply a section's density multiplier to a voice config. The resulting
/// hit count is clamped to `[1, steps]` so a voice never disappears
/// entirely and never overflows its grid.
pub fn apply_density(config: VoiceConfig, label: SectionLabel) -> VoiceConfig {
    let chars = label.characteristics();
    let scaled = (config.hits as f64 * chars.density_multiplier).round() as usize;
    VoiceConfig {
        hits: scaled.clamp(1, config.steps),
        ..config
    }
}
