//! Rhythm construction — step grids, Euclidean distribution, motifs, and
//! per-bar pattern assembly.

pub mod assemble;
pub mod euclid;
pub mod motif;
pub mod pattern;

pub use assemble::{assemble_bar, BarGrid};
pub use motif::{Motif, MotifMemory, Variation};
pub use pattern::{StepPattern, VoiceConfig};
