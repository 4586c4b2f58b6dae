//! Event stream data model
//!
//! An `EventStream` is the in-memory form of a multi-track MIDI sequence:
//! per-track ordered events carrying delta-times, with note-on/note-off
//! messages broken out into structured variants and everything else kept
//! verbatim as an opaque `midly` event. Opaque events are never interpreted
//! and survive any transformation unchanged.
//!
//! Like `midly::Smf`, the stream borrows opaque byte data (track names, sysex
//! payloads) from the buffer it was parsed from; streams built in memory use
//! the `'static` lifetime.

use midly::TrackEventKind;

/// Highest valid MIDI pitch/velocity value
pub const MAX_MIDI_VALUE: u8 = 127;

/// A single timed event within a track
#[derive(Debug, Clone, PartialEq)]
pub struct Event<'a> {
    /// Ticks since the previous event on the same track
    pub delta_ticks: u32,
    pub kind: EventKind<'a>,
}

/// Event discriminant. Note events carry their channel and velocity so a
/// stream rebuilt from this model reproduces the source file; the analysis
/// routines themselves only look at pitch and note-on velocity.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind<'a> {
    NoteOn { channel: u8, pitch: u8, velocity: u8 },
    NoteOff { channel: u8, pitch: u8, velocity: u8 },
    /// Any other message (meta, controller, pitch bend, sysex), preserved verbatim
    Other(TrackEventKind<'a>),
}

impl<'a> Event<'a> {
    /// Convenience constructor for a note-on event
    pub fn note_on(delta_ticks: u32, channel: u8, pitch: u8, velocity: u8) -> Self {
        Self {
            delta_ticks,
            kind: EventKind::NoteOn {
                channel,
                pitch,
                velocity,
            },
        }
    }

    /// Convenience constructor for a note-off event (release velocity 0)
    pub fn note_off(delta_ticks: u32, channel: u8, pitch: u8) -> Self {
        Self {
            delta_ticks,
            kind: EventKind::NoteOff {
                channel,
                pitch,
                velocity: 0,
            },
        }
    }

    /// Convenience constructor for an opaque event
    pub fn other(delta_ticks: u32, kind: TrackEventKind<'a>) -> Self {
        Self {
            delta_ticks,
            kind: EventKind::Other(kind),
        }
    }
}

/// One track of an event stream
#[derive(Debug, Clone, PartialEq)]
pub struct Track<'a> {
    /// Position of this track within the containing stream
    pub index: usize,
    /// Display name, when the track carries one
    pub name: Option<String>,
    pub events: Vec<Event<'a>>,
}

impl<'a> Track<'a> {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            name: None,
            events: Vec::new(),
        }
    }

    /// Iterate events paired with their absolute time in ticks. All events
    /// share one running timeline, opaque ones included.
    pub fn iter_absolute(&self) -> impl Iterator<Item = (u64, &Event<'a>)> {
        let mut abs_time = 0u64;
        self.events.iter().map(move |event| {
            abs_time += u64::from(event.delta_ticks);
            (abs_time, event)
        })
    }
}

/// A complete multi-track event stream
#[derive(Debug, Clone, PartialEq)]
pub struct EventStream<'a> {
    /// Ticks per quarter-note beat, shared by every track
    pub ticks_per_beat: u16,
    pub tracks: Vec<Track<'a>>,
}

impl<'a> EventStream<'a> {
    pub fn new(ticks_per_beat: u16) -> Self {
        Self {
            ticks_per_beat,
            tracks: Vec::new(),
        }
    }

    /// Total event count across all tracks
    pub fn event_count(&self) -> usize {
        self.tracks.iter().map(|t| t.events.len()).sum()
    }
}
