//! Adaptive performance layer — turns step grids into played notes.
//!
//! Velocity shaping, swing and microtiming, the surprise (human-error)
//! engine, contextual ghost notes, and the physical limb simulator. Each
//! stage's constants were tuned by ear in the original instrument and are
//! preserved as-is.

pub mod dynamics;
pub mod ghost;
pub mod limb;
pub mod surprise;
pub mod timing;

pub use dynamics::{intensity, velocity};
pub use ghost::{maybe_ghost, GhostNote};
pub use limb::{assign_limb, movement_seconds, LimbTracker};
pub use surprise::{check_surprise, Surprise};
pub use timing::{microtiming, swing_offset};
