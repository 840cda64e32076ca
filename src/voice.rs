//! Drum voices, limbs, and the General MIDI percussion map.
//!
//! Voices are a closed enum so that dispatch over them is exhaustive and
//! adding a voice is a compile-time-checked change. The pitch, duration,
//! and base-velocity tables live here as plain match tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A percussion voice in the kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Voice {
    Kick,
    Snare,
    ClosedHat,
    OpenHat,
    HatPedal,
    LowTom,
    MidTom,
    HighTom,
    Ride,
    Crash,
    SideStick,
    SnareAccent,
}

impl Voice {
    /// Canonical processing order. Assembly and per-step emission walk
    /// voices in this order, which makes the RNG draw sequence stable.
    pub const ORDER: [Voice; 12] = [
        Voice::Kick,
        Voice::Snare,
        Voice::ClosedHat,
        Voice::OpenHat,
        Voice::HatPedal,
        Voice::LowTom,
        Voice::MidTom,
        Voice::HighTom,
        Voice::Ride,
        Voice::Crash,
        Voice::SideStick,
        Voice::SnareAccent,
    ];

    /// Position in [`Voice::ORDER`], used as a sort tiebreaker.
    pub fn order_index(self) -> usize {
        Voice::ORDER.iter().position(|&v| v == self).unwrap_or(0)
    }

    /// General MIDI percussion note number.
    pub fn gm_pitch(self) -> u8 {
        match self {
            Voice::Kick => 36,
            Voice::Snare => 38,
            Voice::ClosedHat => 42,
            Voice::OpenHat => 46,
            Voice::HatPedal => 44,
            Voice::LowTom => 41,
            Voice::MidTom => 45,
            Voice::HighTom => 50,
            Voice::Ride => 51,
            Voice::Crash => 49,
            Voice::SideStick => 37,
            Voice::SnareAccent => 40,
        }
    }

    /// Default note duration in ticks (960 PPQN).
    pub fn duration_ticks(self) -> u64 {
        match self {
            Voice::Kick | Voice::Snare | Voice::SnareAccent => 240,
            Voice::ClosedHat | Voice::HatPedal | Voice::SideStick => 120,
            Voice::OpenHat => 480,
            Voice::LowTom | Voice::MidTom | Voice::HighTom | Voice::Ride => 240,
            Voice::Crash => 960,
        }
    }

    /// Base velocity before any shaping.
    pub fn base_velocity(self) -> f64 {
        match self {
            Voice::Kick => 105.0,
            Voice::Snare => 100.0,
            Voice::SnareAccent => 108.0,
            Voice::ClosedHat => 72.0,
            Voice::OpenHat => 80.0,
            Voice::HatPedal => 64.0,
            Voice::LowTom => 92.0,
            Voice::MidTom => 90.0,
            Voice::HighTom => 88.0,
            Voice::Ride => 76.0,
            Voice::Crash => 110.0,
            Voice::SideStick => 60.0,
        }
    }

    /// Hat-family voices get looser microtiming.
    pub fn is_hat(self) -> bool {
        matches!(self, Voice::ClosedHat | Voice::OpenHat | Voice::HatPedal)
    }

    /// Backbone voices get tighter microtiming.
    pub fn is_backbone(self) -> bool {
        matches!(self, Voice::Kick | Voice::Snare | Voice::SnareAccent)
    }
}

impl fmt::Display for Voice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Voice::Kick => "kick",
            Voice::Snare => "snare",
            Voice::ClosedHat => "closed-hat",
            Voice::OpenHat => "open-hat",
            Voice::HatPedal => "hat-pedal",
            Voice::LowTom => "low-tom",
            Voice::MidTom => "mid-tom",
            Voice::HighTom => "high-tom",
            Voice::Ride => "ride",
            Voice::Crash => "crash",
            Voice::SideStick => "side-stick",
            Voice::SnareAccent => "snare-accent",
        };
        f.write_str(name)
    }
}

impl FromStr for Voice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kick" => Ok(Voice::Kick),
            "snare" => Ok(Voice::Snare),
            "closed-hat" | "hat" | "hihat" => Ok(Voice::ClosedHat),
            "open-hat" => Ok(Voice::OpenHat),
            "hat-pedal" => Ok(Voice::HatPedal),
            "low-tom" => Ok(Voice::LowTom),
            "mid-tom" => Ok(Voice::MidTom),
            "high-tom" => Ok(Voice::HighTom),
            "ride" => Ok(Voice::Ride),
            "crash" => Ok(Voice::Crash),
            "side-stick" => Ok(Voice::SideStick),
            "snare-accent" => Ok(Voice::SnareAccent),
            other => Err(format!("unknown voice: {other}")),
        }
    }
}

/// One of the drummer's four limbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Limb {
    RightHand,
    LeftHand,
    RightFoot,
    LeftFoot,
}

impl Limb {
    pub const COUNT: usize = 4;

    /// Dense index for per-limb state arrays.
    pub fn index(self) -> usize {
        match self {
            Limb::RightHand => 0,
            Limb::LeftHand => 1,
            Limb::RightFoot => 2,
            Limb::LeftFoot => 3,
        }
    }

    pub fn is_foot(self) -> bool {
        matches!(self, Limb::RightFoot | Limb::LeftFoot)
    }
}

impl fmt::Display for Limb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Limb::RightHand => "right-hand",
            Limb::LeftHand => "left-hand",
            Limb::RightFoot => "right-foot",
            Limb::LeftFoot => "left-foot",
        };
        f.write_str(name)
    }
}
