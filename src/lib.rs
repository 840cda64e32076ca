//! Tambour — a deterministic procedural drum-pattern generator.
//!
//! Given a seed and a handful of musical parameters, the engine produces
//! a fully-timed percussion part that sounds performed rather than
//! quantized: Euclidean base rhythms shaped by song sections, recurring
//! motifs, tension-driven fills, contextual ghost notes, controlled human
//! imperfection, and a four-limb physical-constraint simulator.
//!
//! The crate is host-agnostic: it emits an ordered list of
//! [`NoteEvent`]s in 960-PPQN ticks and leaves timeline insertion,
//! tick-to-time mapping, and persistence to the caller.

pub mod arrange;
pub mod engine;
pub mod error;
pub mod event;
pub mod genre;
pub mod perform;
pub mod rhythm;
pub mod rng;
pub mod time;
pub mod voice;

pub use engine::{generate, generate_genre, GenerationRequest, GenreRequest};
pub use error::GenerateError;
pub use event::NoteEvent;
pub use genre::Genre;
pub use voice::{Limb, Voice};
