//! Request serialization tests — YAML config round-trips and JSON event
//! output, the two formats the CLI speaks.

use std::io::Write;

use tambour::arrange::section::{SectionLabel, SectionMode};
use tambour::engine::{generate, GenerationRequest};
use tambour::event::NoteEvent;
use tambour::rhythm::pattern::VoiceConfig;
use tambour::voice::Voice;

fn sample_request() -> GenerationRequest {
    GenerationRequest {
        seed: 2024,
        bars: 2,
        tempo_bpm: 96.0,
        voices: vec![
            (Voice::Kick, VoiceConfig::new(16, 5, 0)),
            (Voice::Snare, VoiceConfig::new(16, 3, 4)),
        ],
        section_mode: SectionMode::Fixed(SectionLabel::Bridge),
        swing_percent: 55.0,
        ghost_chance: 0.8,
    }
}

#[test]
fn yaml_round_trip_preserves_the_request() {
    let request = sample_request();
    let yaml = serde_yaml::to_string(&request).unwrap();
    let parsed: GenerationRequest = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(parsed.seed, request.seed);
    assert_eq!(parsed.bars, request.bars);
    assert_eq!(parsed.voices, request.voices);
    assert_eq!(parsed.section_mode, request.section_mode);
    // Identical requests generate identical output either way.
    assert_eq!(generate(&parsed).unwrap(), generate(&request).unwrap());
}

#[test]
fn yaml_file_round_trip_through_tempfile() {
    let request = sample_request();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_yaml::to_string(&request).unwrap().as_bytes())
        .unwrap();
    let text = std::fs::read_to_string(file.path()).unwrap();
    let parsed: GenerationRequest = serde_yaml::from_str(&text).unwrap();
    assert_eq!(parsed.voices, request.voices);
}

#[test]
fn omitted_knobs_take_defaults() {
    let yaml = "
seed: 9
bars: 1
voices:
  - - kick
    - steps: 16
      hits: 4
      rotation: 0
";
    let parsed: GenerationRequest = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(parsed.tempo_bpm, 120.0);
    assert_eq!(parsed.swing_percent, 0.0);
    assert_eq!(parsed.ghost_chance, 0.5);
    assert_eq!(parsed.section_mode, SectionMode::Auto);
    assert!(generate(&parsed).is_ok());
}

#[test]
fn events_serialize_to_json_and_back() {
    let events = generate(&sample_request()).unwrap();
    let json = serde_json::to_string(&events).unwrap();
    let parsed: Vec<NoteEvent> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, events);
}

#[test]
fn json_uses_kebab_case_voice_names() {
    let events = generate(&sample_request()).unwrap();
    let json = serde_json::to_string(&events).unwrap();
    assert!(json.contains("\"kick\"") || json.contains("\"snare\""));
    assert!(!json.contains("\"Kick\""));
}
