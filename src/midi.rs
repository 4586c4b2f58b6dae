//! MIDI file bridge
//!
//! Converts between Standard MIDI Files and the `EventStream` model, using
//! the `midly` crate. The stream borrows opaque byte data from the parsed
//! buffer, so callers keep the file bytes alive for as long as the stream
//! (the same contract `midly::Smf` itself has).

use crate::error::{MotifError, Result};
use crate::event::{Event, EventKind, EventStream, Track};
use midly::num::{u15, u28, u4, u7};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};
use std::fmt::Write as _;
use std::path::Path;

/// Parse raw SMF bytes into an event stream.
///
/// Only metrically-timed files carry a ticks-per-beat value; SMPTE-timed
/// files are rejected rather than approximated.
pub fn read_bytes(bytes: &[u8]) -> Result<EventStream<'_>> {
    let smf = Smf::parse(bytes)?;
    from_smf(smf)
}

/// Convert a parsed `Smf` into an event stream
pub fn from_smf(smf: Smf<'_>) -> Result<EventStream<'_>> {
    let ticks_per_beat = match smf.header.timing {
        Timing::Metrical(tpb) => tpb.as_int(),
        Timing::Timecode(fps, _) => {
            return Err(MotifError::UnsupportedTiming(format!(
                "SMPTE timecode timing ({:?} fps) has no ticks-per-beat",
                fps
            )));
        }
    };

    let mut stream = EventStream::new(ticks_per_beat);
    for (index, events) in smf.tracks.iter().enumerate() {
        let mut track = Track::new(index);
        for event in events {
            let kind = match event.kind {
                TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::NoteOn { key, vel },
                } => EventKind::NoteOn {
                    channel: channel.as_int(),
                    pitch: key.as_int(),
                    velocity: vel.as_int(),
                },
                TrackEventKind::Midi {
                    channel,
                    message: MidiMessage::NoteOff { key, vel },
                } => EventKind::NoteOff {
                    channel: channel.as_int(),
                    pitch: key.as_int(),
                    velocity: vel.as_int(),
                },
                other => {
                    if let TrackEventKind::Meta(MetaMessage::TrackName(name)) = other {
                        if track.name.is_none() {
                            track.name = Some(String::from_utf8_lossy(name).into_owned());
                        }
                    }
                    EventKind::Other(other)
                }
            };
            track.events.push(Event {
                delta_ticks: event.delta.as_int(),
                kind,
            });
        }
        stream.tracks.push(track);
    }

    Ok(stream)
}

/// Rebuild an `Smf` from an event stream.
///
/// Event count, order, deltas and every carried field round-trip exactly;
/// the format is SingleTrack for a single track and Parallel otherwise.
pub fn to_smf<'a>(stream: &EventStream<'a>) -> Smf<'a> {
    let format = if stream.tracks.len() <= 1 {
        Format::SingleTrack
    } else {
        Format::Parallel
    };
    let header = Header::new(format, Timing::Metrical(u15::new(stream.ticks_per_beat)));

    let mut smf = Smf::new(header);
    for track in &stream.tracks {
        let mut events = midly::Track::new();
        for event in &track.events {
            let kind = match &event.kind {
                EventKind::NoteOn {
                    channel,
                    pitch,
                    velocity,
                } => TrackEventKind::Midi {
                    channel: u4::new(*channel),
                    message: MidiMessage::NoteOn {
                        key: u7::new(*pitch),
                        vel: u7::new(*velocity),
                    },
                },
                EventKind::NoteOff {
                    channel,
                    pitch,
                    velocity,
                } => TrackEventKind::Midi {
                    channel: u4::new(*channel),
                    message: MidiMessage::NoteOff {
                        key: u7::new(*pitch),
                        vel: u7::new(*velocity),
                    },
                },
                EventKind::Other(kind) => kind.clone(),
            };
            events.push(TrackEvent {
                delta: u28::new(event.delta_ticks),
                kind,
            });
        }
        smf.tracks.push(events);
    }
    smf
}

/// Serialize an event stream to SMF bytes
pub fn write_bytes(stream: &EventStream<'_>) -> Result<Vec<u8>> {
    let smf = to_smf(stream);
    let mut bytes = Vec::new();
    smf.write(&mut bytes)
        .map_err(|e| MotifError::FileError(format!("Failed to write SMF data: {:?}", e)))?;
    Ok(bytes)
}

/// Write an event stream to an SMF file
pub fn write_file(stream: &EventStream<'_>, path: &Path) -> Result<()> {
    let smf = to_smf(stream);
    smf.save(path)?;
    Ok(())
}

/// Render a metadata summary for a loaded stream
pub fn summarize(stream: &EventStream<'_>, source_name: &str) -> String {
    let mut out = String::new();
    writeln!(out, "Successfully loaded {}", source_name).unwrap();
    writeln!(out, "Number of tracks: {}", stream.tracks.len()).unwrap();
    writeln!(out, "Ticks per beat: {}", stream.ticks_per_beat).unwrap();
    for track in &stream.tracks {
        writeln!(
            out,
            "  Track {}: {} ({} events)",
            track.index,
            track.name.as_deref().unwrap_or("<unnamed>"),
            track.events.len()
        )
        .unwrap();
    }
    out
}
