//! Tambour CLI — generate a drum part and print it.
//!
//! A thin host stand-in: parses parameters from flags or a YAML request
//! file, runs one generation, and writes the events as an aligned table
//! or JSON. Holds no state between invocations.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use tambour::arrange::section::{SectionLabel, SectionMode};
use tambour::engine::{generate, generate_genre, GenerationRequest, GenreRequest};
use tambour::error::GenerateError;
use tambour::event::NoteEvent;
use tambour::genre::Genre;
use tambour::rhythm::pattern::VoiceConfig;
use tambour::voice::Voice;

#[derive(Debug, Parser)]
#[command(name = "tambour", version, about = "Deterministic procedural drum-pattern generator")]
struct Cli {
    /// RNG seed. Same seed + same parameters = same pattern.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Pattern length in bars.
    #[arg(long, default_value_t = 4)]
    bars: u32,

    /// Tempo in BPM (used for physical limb timing).
    #[arg(long, default_value_t = 120.0)]
    tempo: f64,

    /// Swing amount, 0 (straight) to 100.
    #[arg(long, default_value_t = 0.0)]
    swing: f64,

    /// Master ghost-note multiplier, 0.0 to 1.0.
    #[arg(long, default_value_t = 0.5)]
    ghost_chance: f64,

    /// Section mode: auto, or a fixed label (intro/verse/chorus/bridge/outro).
    #[arg(long, default_value = "auto")]
    section: String,

    /// Voice spec, repeatable: NAME=STEPS:HITS:ROTATION (e.g. kick=16:4:0).
    #[arg(long = "voice")]
    voices: Vec<String>,

    /// Generate from a genre blueprint instead of voice configs.
    #[arg(long, conflicts_with_all = ["voices", "section", "config"])]
    genre: Option<String>,

    /// Load a full generation request from a YAML file.
    #[arg(long, conflicts_with = "voices")]
    config: Option<PathBuf>,

    /// Emit JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Write output to a file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

fn parse_section(s: &str) -> Result<SectionMode, String> {
    if s.eq_ignore_ascii_case("auto") {
        Ok(SectionMode::Auto)
    } else {
        s.parse::<SectionLabel>().map(SectionMode::Fixed)
    }
}

/// Parse `NAME=STEPS:HITS:ROTATION`.
fn parse_voice_spec(spec: &str) -> Result<(Voice, VoiceConfig), String> {
    let (name, numbers) = spec
        .split_once('=')
        .ok_or_else(|| format!("voice spec '{spec}' needs NAME=STEPS:HITS:ROTATION"))?;
    let voice: Voice = name.parse()?;
    let parts: Vec<&str> = numbers.split(':').collect();
    if parts.len() != 3 {
        return Err(format!("voice spec '{spec}' needs STEPS:HITS:ROTATION"));
    }
    let parse = |s: &str, what: &str| {
        s.parse::<usize>()
            .map_err(|_| format!("voice spec '{spec}': bad {what} '{s}'"))
    };
    Ok((
        voice,
        VoiceConfig::new(
            parse(parts[0], "steps")?,
            parse(parts[1], "hits")?,
            parse(parts[2], "rotation")?,
        ),
    ))
}

fn build_events(cli: &Cli) -> Result<Vec<NoteEvent>, String> {
    if let Some(genre_key) = &cli.genre {
        let genre: Genre = genre_key.parse().map_err(|e: GenerateError| e.to_string())?;
        let request = GenreRequest {
            seed: cli.seed,
            genre,
            bars: cli.bars,
            tempo_bpm: cli.tempo,
        };
        return generate_genre(&request).map_err(|e| e.to_string());
    }

    let request = if let Some(path) = &cli.config {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
        serde_yaml::from_str::<GenerationRequest>(&text)
            .map_err(|e| format!("cannot parse {}: {e}", path.display()))?
    } else {
        let mut request = GenerationRequest::with_default_kit(cli.seed, cli.bars);
        request.tempo_bpm = cli.tempo;
        request.swing_percent = cli.swing;
        request.ghost_chance = cli.ghost_chance;
        request.section_mode = parse_section(&cli.section)?;
        if !cli.voices.is_empty() {
            request.voices = cli
                .voices
                .iter()
                .map(|s| parse_voice_spec(s))
                .collect::<Result<_, _>>()?;
        }
        request
    };

    generate(&request).map_err(|e| e.to_string())
}

fn render_table(events: &[NoteEvent]) -> String {
    let mut out = String::from("tick     voice         pitch  vel  dur   limb\n");
    for e in events {
        out.push_str(&format!(
            "{:<8} {:<13} {:<6} {:<4} {:<5} {}\n",
            e.start_tick, e.voice, e.pitch, e.velocity, e.duration_ticks, e.limb
        ));
    }
    out
}

fn main() {
    let cli = Cli::parse();

    let events = match build_events(&cli) {
        Ok(events) => events,
        Err(message) => {
            eprintln!("error: {message}");
            process::exit(1);
        }
    };

    let rendered = if cli.json {
        match serde_json::to_string_pretty(&events) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("error: cannot serialize events: {e}");
                process::exit(1);
            }
        }
    } else {
        render_table(&events)
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = fs::write(path, rendered) {
                eprintln!("error: cannot write {}: {e}", path.display());
                process::exit(1);
            }
            println!("{} events -> {}", events.len(), path.display());
        }
        None => print!("{rendered}"),
    }
}
