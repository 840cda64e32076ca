//! The generation engine — request types, per-run context, and the two
//! top-level entry points.
//!
//! A run is pure, synchronous computation: validate the request, seed one
//! RNG stream, walk bars in order, and hand back a sorted event list. All
//! mutable state (RNG, limb tracker, motif memory) lives in a
//! [`GenerationContext`] created for the run and dropped with it; nothing
//! survives between invocations.
//!
//! The per-bar draw order is fixed by contract: assembly draws (motifs,
//! call-and-response) per voice in canonical order, then the fill
//! decision, then the performance draws per active cell in chronological
//! order with voices tie-broken canonically.

use serde::{Deserialize, Serialize};

use crate::arrange::fill::{self, FillKind};
use crate::arrange::section::{label_for, SectionMode};
use crate::error::GenerateError;
use crate::event::{sort_events, NoteEvent};
use crate::genre::{render_measure, Genre};
use crate::perform::dynamics::{intensity, velocity};
use crate::perform::ghost::{maybe_ghost, GhostContext};
use crate::perform::limb::{assign_limb, LimbTracker};
use crate::perform::surprise::{check_surprise, Surprise};
use crate::perform::timing::{microtiming, swing_offset};
use crate::rhythm::assemble::assemble_bar;
use crate::rhythm::motif::MotifMemory;
use crate::rhythm::pattern::VoiceConfig;
use crate::rng::{DrawSource, RngStream};
use crate::time;
use crate::voice::Voice;

fn default_tempo() -> f64 {
    120.0
}

fn default_ghost_chance() -> f64 {
    0.5
}

/// A section-mode generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub seed: u64,
    /// Pattern length in bars; must be positive.
    pub bars: u32,
    /// Tempo, used only to convert ticks to seconds for the limb
    /// simulator.
    #[serde(default = "default_tempo")]
    pub tempo_bpm: f64,
    /// Per-voice Euclidean configs. Order does not matter; voices are
    /// processed canonically.
    pub voices: Vec<(Voice, VoiceConfig)>,
    #[serde(default = "GenerationRequest::default_section_mode")]
    pub section_mode: SectionMode,
    /// 0 = straight, 100 = maximum swing.
    #[serde(default)]
    pub swing_percent: f64,
    /// Master multiplier on the contextual ghost-note model.
    #[serde(default = "default_ghost_chance")]
    pub ghost_chance: f64,
}

impl GenerationRequest {
    fn default_section_mode() -> SectionMode {
        SectionMode::Auto
    }

    /// A standard kick/snare/hat kit, handy for callers that only want to
    /// pick a seed and a length.
    pub fn with_default_kit(seed: u64, bars: u32) -> Self {
        Self {
            seed,
            bars,
            tempo_bpm: default_tempo(),
            voices: vec![
                (Voice::Kick, VoiceConfig::new(16, 4, 0)),
                (Voice::Snare, VoiceConfig::new(16, 4, 8)),
                (Voice::ClosedHat, VoiceConfig::new(16, 8, 0)),
            ],
            section_mode: SectionMode::Auto,
            swing_percent: 0.0,
            ghost_chance: default_ghost_chance(),
        }
    }
}

/// A genre-mode generation request. Mutually exclusive with the section
/// path for a given run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreRequest {
    pub seed: u64,
    pub genre: Genre,
    /// Length of the time selection in measures.
    pub bars: u32,
    #[serde(default = "default_tempo")]
    pub tempo_bpm: f64,
}

/// All mutable state of one run. Created per invocation; never shared.
struct GenerationContext {
    rng: RngStream,
    limbs: LimbTracker,
    motifs: MotifMemory,
}

impl GenerationContext {
    fn new(seed: u64) -> Self {
        Self {
            rng: RngStream::seeded(seed),
            limbs: LimbTracker::new(),
            motifs: MotifMemory::new(),
        }
    }
}

/// One pending emission within a bar, ordered chronologically before
/// performance processing.
enum Emission {
    /// An active grid cell to perform.
    Cell {
        voice: Voice,
        step: usize,
        steps: usize,
        tick: f64,
    },
    /// A fill-library note with its velocity already drawn.
    Fill {
        voice: Voice,
        tick: f64,
        velocity: u8,
    },
}

impl Emission {
    fn tick(&self) -> f64 {
        match self {
            Emission::Cell { tick, .. } | Emission::Fill { tick, .. } => *tick,
        }
    }

    fn voice(&self) -> Voice {
        match self {
            Emission::Cell { voice, .. } | Emission::Fill { voice, .. } => *voice,
        }
    }

    fn is_fill(&self) -> bool {
        matches!(self, Emission::Fill { .. })
    }
}

fn validate(request: &GenerationRequest) -> Result<(), GenerateError> {
    if request.bars == 0 {
        return Err(GenerateError::invalid("bars must be > 0"));
    }
    if request.voices.is_empty() {
        return Err(GenerateError::invalid("at least one voice is required"));
    }
    for (i, (voice, config)) in request.voices.iter().enumerate() {
        if config.steps == 0 {
            return Err(GenerateError::invalid(format!(
                "{voice}: steps must be > 0"
            )));
        }
        if request.voices[..i].iter().any(|(v, _)| v == voice) {
            return Err(GenerateError::invalid(format!(
                "{voice} is listed more than once"
            )));
        }
    }
    if !(0.0..=100.0).contains(&request.swing_percent) {
        return Err(GenerateError::invalid("swing_percent must be in 0..=100"));
    }
    if !(0.0..=1.0).contains(&request.ghost_chance) {
        return Err(GenerateError::invalid("ghost_chance must be in 0.0..=1.0"));
    }
    if !request.tempo_bpm.is_finite() || request.tempo_bpm <= 0.0 {
        return Err(GenerateError::invalid("tempo_bpm must be positive"));
    }
    Ok(())
}

/// Voices in canonical processing order with hit counts clamped.
fn normalized_voices(request: &GenerationRequest) -> Vec<(Voice, VoiceConfig)> {
    let mut voices: Vec<(Voice, VoiceConfig)> = request
        .voices
        .iter()
        .map(|&(v, c)| (v, c.clamped()))
        .collect();
    voices.sort_by_key(|(v, _)| v.order_index());
    voices
}

/// Generate a full drum part from a section-mode request.
///
/// Deterministic: identical requests produce byte-identical event lists.
/// Notes vetoed by the limb simulator are silently absent; this is
/// documented behavior, not an error.
pub fn generate(request: &GenerationRequest) -> Result<Vec<NoteEvent>, GenerateError> {
    validate(request)?;
    let voices = normalized_voices(request);
    let mut ctx = GenerationContext::new(request.seed);
    let mut events = Vec::new();

    let mut previous_density = 0.5;
    let mut previous_fill: Option<FillKind> = None;

    for bar in 0..request.bars {
        let label = label_for(bar, request.bars, request.section_mode);
        let chars = label.characteristics();

        let grid = assemble_bar(&voices, label, bar, &mut ctx.motifs, &mut ctx.rng);
        let bar_density = grid.density();

        // Fill decision comes after assembly and before performance.
        let mut emissions: Vec<Emission> = Vec::new();
        let tension = fill::tension(bar, chars.groove_complexity, previous_density);
        let boundary_bonus = if bar % 4 == 3 { 0.3 } else { 0.0 };
        if ctx.rng.chance(chars.fill_probability + boundary_bonus) {
            let kind = fill::choose_kind(tension, previous_fill, &mut ctx.rng);
            previous_fill = Some(kind);
            for note in kind.library() {
                let jitter = ctx.rng.range_f64(-5.0, 5.0);
                let shaped = (note.base_velocity as f64 + jitter).round() as i32;
                emissions.push(Emission::Fill {
                    voice: note.voice,
                    tick: time::bar_start(bar) as f64 + note.position * time::step_ticks(16),
                    velocity: shaped.clamp(1, 127) as u8,
                });
            }
        }

        for (voice, pattern) in grid.voices() {
            let steps = pattern.len();
            for step in 0..steps {
                if pattern.get(step) {
                    emissions.push(Emission::Cell {
                        voice,
                        step,
                        steps,
                        tick: time::step_position(bar, step, steps),
                    });
                }
            }
        }

        // Chronological walk; canonical voice order breaks ties, cells
        // before fill notes.
        emissions.sort_by(|a, b| {
            a.tick()
                .partial_cmp(&b.tick())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.voice().order_index().cmp(&b.voice().order_index()))
                .then(a.is_fill().cmp(&b.is_fill()))
        });

        for emission in emissions {
            match emission {
                Emission::Cell {
                    voice,
                    step,
                    steps,
                    tick,
                } => perform_cell(
                    request,
                    &mut ctx,
                    voice,
                    step,
                    steps,
                    tick,
                    bar,
                    chars.dynamics_offset,
                    bar_density,
                    &mut events,
                ),
                Emission::Fill {
                    voice,
                    tick,
                    velocity,
                } => {
                    emit(
                        voice,
                        tick,
                        velocity,
                        request.tempo_bpm,
                        &mut ctx,
                        &mut events,
                    );
                }
            }
        }

        previous_density = bar_density;
    }

    sort_events(&mut events);
    Ok(events)
}

/// Assign a limb, consult the physical gate, and (if playable) push the
/// note. The assignment draw happens whether or not the strike lands, so
/// the draw sequence never depends on limb state.
fn emit(
    voice: Voice,
    tick: f64,
    velocity: u8,
    bpm: f64,
    ctx: &mut GenerationContext,
    events: &mut Vec<NoteEvent>,
) {
    let tick = tick.round().max(0.0) as u64;
    let limb = assign_limb(voice, &mut ctx.rng);
    let seconds = time::ticks_to_seconds(tick as f64, bpm);
    if ctx.limbs.try_strike(limb, voice, seconds) {
        events.push(NoteEvent::at(voice, tick, velocity, limb));
    }
}

#[allow(clippy::too_many_arguments)]
fn perform_cell(
    request: &GenerationRequest,
    ctx: &mut GenerationContext,
    voice: Voice,
    step: usize,
    steps: usize,
    base_tick: f64,
    bar: u32,
    dynamics_offset: f64,
    bar_density: f64,
    events: &mut Vec<NoteEvent>,
) {
    let inten = intensity(dynamics_offset, bar % 4, step, steps);
    let mut vel = velocity(voice, step, steps, inten, &mut ctx.rng);

    let step_width = time::step_ticks(steps);
    let mut tick = base_tick
        + swing_offset(step, step_width, request.swing_percent)
        + microtiming(voice, inten, &mut ctx.rng);

    let mut played_voice = voice;
    match check_surprise(bar, request.bars, step, steps, &mut ctx.rng) {
        Some(Surprise::Drop) => return,
        Some(Surprise::Displace { ticks }) => {
            tick += ticks;
            vel = vel.saturating_add(10).min(127);
        }
        Some(Surprise::PreGhost) if matches!(voice, Voice::Snare | Voice::SnareAccent) => {
            let ghost_vel = ((vel as f64 * 0.45).round() as u8).max(1);
            emit(
                Voice::SideStick,
                tick - 20.0,
                ghost_vel,
                request.tempo_bpm,
                ctx,
                events,
            );
        }
        Some(Surprise::OpenHatSub) if voice.is_hat() => {
            played_voice = Voice::OpenHat;
        }
        Some(Surprise::Grace) => {
            let grace_vel = ((vel as f64 * 0.5).round() as u8).max(1);
            emit(voice, tick - 15.0, grace_vel, request.tempo_bpm, ctx, events);
        }
        // Voice-specific variants degrade to a plain hit elsewhere.
        Some(Surprise::PreGhost) | Some(Surprise::OpenHatSub) | None => {}
    }

    emit(played_voice, tick, vel, request.tempo_bpm, ctx, events);

    if voice == Voice::Snare {
        let ghost_ctx = GhostContext {
            step,
            steps,
            bar_index: bar,
            total_bars: request.bars,
            bar_density,
            ghost_chance: request.ghost_chance,
        };
        if let Some(ghost) = maybe_ghost(ghost_ctx, step_width, &mut ctx.rng) {
            emit(
                Voice::SideStick,
                tick + ghost.offset_ticks,
                ghost.velocity,
                request.tempo_bpm,
                ctx,
                events,
            );
        }
    }
}

/// Generate from a genre blueprint. Core hits always sound; variable
/// rules are resampled every run.
pub fn generate_genre(request: &GenreRequest) -> Result<Vec<NoteEvent>, GenerateError> {
    if request.bars == 0 {
        return Err(GenerateError::invalid("bars must be > 0"));
    }
    if !request.tempo_bpm.is_finite() || request.tempo_bpm <= 0.0 {
        return Err(GenerateError::invalid("tempo_bpm must be positive"));
    }

    let blueprint = request.genre.blueprint();
    let mut ctx = GenerationContext::new(request.seed);
    let mut events = Vec::new();

    for bar in 0..request.bars {
        render_measure(
            blueprint,
            bar,
            request.tempo_bpm,
            &mut ctx.limbs,
            &mut ctx.rng,
            &mut events,
        );
    }

    sort_events(&mut events);
    Ok(events)
}
