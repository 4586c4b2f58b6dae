//! Validation tests for the SMF bridge

use midimotif::{midi, Event, EventStream, MotifError, Track};
use midly::num::{u15, u24, u4, u7};
use midly::{Format, Fps, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};

/// Build a two-track stream exercising every event variant the model carries
fn sample_stream() -> EventStream<'static> {
    let mut stream = EventStream::new(480);

    let mut lead = Track::new(0);
    lead.name = Some("Lead".to_string());
    lead.events = vec![
        Event::other(
            0,
            TrackEventKind::Meta(MetaMessage::TrackName(b"Lead")),
        ),
        Event::other(
            0,
            TrackEventKind::Meta(MetaMessage::Tempo(u24::new(500_000))),
        ),
        Event::note_on(0, 0, 67, 100),
        Event::note_off(240, 0, 67),
        Event::other(
            60,
            TrackEventKind::Midi {
                channel: u4::new(0),
                message: MidiMessage::Controller {
                    controller: u7::new(64),
                    value: u7::new(127),
                },
            },
        ),
        Event::note_on(60, 0, 64, 90),
        Event::note_off(480, 0, 64),
        Event::other(0, TrackEventKind::Meta(MetaMessage::EndOfTrack)),
    ];
    stream.tracks.push(lead);

    let mut bass = Track::new(1);
    bass.events = vec![
        Event::note_on(0, 3, 43, 80),
        Event::note_off(960, 3, 43),
        Event::other(0, TrackEventKind::Meta(MetaMessage::EndOfTrack)),
    ];
    stream.tracks.push(bass);

    stream
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_preserves_stream() {
        let stream = sample_stream();

        let bytes = midi::write_bytes(&stream).unwrap();
        let parsed = midi::read_bytes(&bytes).unwrap();

        assert_eq!(parsed, stream);
        assert_eq!(parsed.event_count(), stream.event_count());
    }

    #[test]
    fn test_track_name_captured_on_parse() {
        let bytes = midi::write_bytes(&sample_stream()).unwrap();
        let parsed = midi::read_bytes(&bytes).unwrap();

        assert_eq!(parsed.tracks[0].name.as_deref(), Some("Lead"));
        assert_eq!(parsed.tracks[1].name, None);
    }

    #[test]
    fn test_single_track_written_as_single_track_format() {
        let mut stream = EventStream::new(480);
        let mut track = Track::new(0);
        track.events = vec![Event::other(
            0,
            TrackEventKind::Meta(MetaMessage::EndOfTrack),
        )];
        stream.tracks.push(track);

        let smf = midi::to_smf(&stream);
        assert_eq!(smf.header.format, Format::SingleTrack);

        let smf = midi::to_smf(&sample_stream());
        assert_eq!(smf.header.format, Format::Parallel);
    }

    #[test]
    fn test_smpte_timing_rejected() {
        let smf = Smf::new(Header::new(
            Format::SingleTrack,
            Timing::Timecode(Fps::Fps25, 40),
        ));

        let err = midi::from_smf(smf).unwrap_err();
        assert!(matches!(err, MotifError::UnsupportedTiming(_)));
    }

    #[test]
    fn test_metrical_timing_read_back() {
        let mut smf = Smf::new(Header::new(
            Format::SingleTrack,
            Timing::Metrical(u15::new(960)),
        ));
        smf.tracks.push(midly::Track::new());

        let stream = midi::from_smf(smf).unwrap();
        assert_eq!(stream.ticks_per_beat, 960);
        assert_eq!(stream.tracks.len(), 1);
    }

    #[test]
    fn test_garbage_bytes_rejected() {
        let err = midi::read_bytes(b"not a midi file").unwrap_err();
        assert!(matches!(err, MotifError::MidiParseError(_)));
    }

    #[test]
    fn test_summary_lists_tracks() {
        let summary = midi::summarize(&sample_stream(), "sample.mid");

        assert!(summary.contains("Successfully loaded sample.mid"));
        assert!(summary.contains("Number of tracks: 2"));
        assert!(summary.contains("Ticks per beat: 480"));
        assert!(summary.contains("Track 0: Lead (8 events)"));
        assert!(summary.contains("Track 1: <unnamed> (3 events)"));
    }
}
