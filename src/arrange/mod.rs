//! Arrangement-level planning — song sections and fills.

pub mod fill;
pub mod section;

pub use fill::{choose_kind, tension, FillKind, FillNote};
pub use section::{apply_density, label_for, SectionCharacteristics, SectionLabel, SectionMode};
