//! Validation tests for the composition generators and their configuration

use midimotif::config::{validate_config, GenerateConfig};
use midimotif::generate::{lorenz_stream, sine_stream};
use midimotif::{assemble_notes, midi, Event, EventKind};
use midly::{MetaMessage, TrackEventKind};

/// Semitone classes of the C-major scale
const C_MAJOR: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

fn tempo_of(event: &Event<'_>) -> Option<u32> {
    match event.kind {
        EventKind::Other(TrackEventKind::Meta(MetaMessage::Tempo(uspq))) => Some(uspq.as_int()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_note_count_and_range() {
        let stream = sine_stream(&GenerateConfig::default());
        assert_eq!(stream.tracks.len(), 1);

        let notes = assemble_notes(&stream.tracks[0]).unwrap();
        // 60 seconds at 60 BPM, one note per beat
        assert_eq!(notes.len(), 60);
        assert_eq!(notes[0].pitch, 60, "The wave starts at its center pitch");
        for note in &notes {
            assert!(
                (48..=72).contains(&note.pitch),
                "Pitch {} outside the one-octave swing",
                note.pitch
            );
            assert_eq!(note.duration_ticks, 480);
            assert_eq!(note.velocity, 100);
        }
    }

    #[test]
    fn test_sine_tempo_event_leads() {
        let stream = sine_stream(&GenerateConfig::default());
        let events = &stream.tracks[0].events;

        // 60 BPM is one million microseconds per quarter
        assert_eq!(tempo_of(&events[0]), Some(1_000_000));
        assert_eq!(
            events.last().unwrap(),
            &Event::other(0, TrackEventKind::Meta(MetaMessage::EndOfTrack))
        );
    }

    #[test]
    fn test_lorenz_pitches_stay_on_scale() {
        let stream = lorenz_stream(&GenerateConfig::default());
        let notes = assemble_notes(&stream.tracks[0]).unwrap();

        assert_eq!(notes.len(), 4000);
        for note in &notes {
            assert!(
                C_MAJOR.contains(&(note.pitch % 12)),
                "Pitch {} is not on the C-major scale",
                note.pitch
            );
            assert!((48..=84).contains(&note.pitch));
            // Sixteenth notes at 480 ticks per beat
            assert_eq!(note.duration_ticks, 120);
        }
    }

    #[test]
    fn test_lorenz_velocity_range() {
        let stream = lorenz_stream(&GenerateConfig::default());
        let notes = assemble_notes(&stream.tracks[0]).unwrap();

        assert!(notes.iter().all(|n| (60..=107).contains(&n.velocity)));
        // The attractor wanders, so the dynamics should too
        assert!(notes.iter().any(|n| n.velocity != notes[0].velocity));
    }

    #[test]
    fn test_lorenz_tempo_event_leads() {
        let stream = lorenz_stream(&GenerateConfig::default());
        // 140 BPM, truncated to whole microseconds
        assert_eq!(tempo_of(&stream.tracks[0].events[0]), Some(428_571));
    }

    #[test]
    fn test_generators_are_deterministic() {
        let config = GenerateConfig::default();
        assert_eq!(lorenz_stream(&config), lorenz_stream(&config));
        assert_eq!(sine_stream(&config), sine_stream(&config));
    }

    #[test]
    fn test_generated_stream_round_trips() {
        let stream = sine_stream(&GenerateConfig::default());

        let bytes = midi::write_bytes(&stream).unwrap();
        let parsed = midi::read_bytes(&bytes).unwrap();
        assert_eq!(parsed, stream);
    }

    #[test]
    fn test_sine_length_follows_config() {
        let mut config = GenerateConfig::default();
        config.sine.duration_seconds = 10;
        config.sine.tempo_bpm = 120.0;

        let stream = sine_stream(&config);
        let notes = assemble_notes(&stream.tracks[0]).unwrap();
        assert_eq!(notes.len(), 20);
    }

    #[test]
    fn test_default_config_validates() {
        assert!(validate_config(&GenerateConfig::default()).is_ok());
    }

    #[test]
    fn test_bad_config_rejected() {
        use midimotif::MotifError;

        let mut config = GenerateConfig::default();
        config.lorenz.dt = 0.0;
        assert!(matches!(
            validate_config(&config).unwrap_err(),
            MotifError::ConfigValidationFailed(_)
        ));

        let mut config = GenerateConfig::default();
        config.sine.pitch_amplitude = 80.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_partial_config_json_fills_defaults() {
        let config: GenerateConfig =
            serde_json::from_str(r#"{"lorenz": {"num_steps": 100}}"#).unwrap();

        assert_eq!(config.lorenz.num_steps, 100);
        assert_eq!(config.lorenz.sigma, 10.0);
        assert_eq!(config.sine.duration_seconds, 60);
        assert!(validate_config(&config).is_ok());
    }
}
