//! Note assembly
//!
//! Pairs raw note-on/note-off events into closed `Note` intervals. A note-on
//! with velocity 0 counts as a note-off, per the MIDI convention.

use crate::error::{MotifError, Result};
use crate::event::{EventKind, Track, MAX_MIDI_VALUE};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A closed note interval reconstructed from a track's raw events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Index of the originating track
    pub track: usize,
    pub pitch: u8,
    /// Absolute onset time in ticks
    pub start_ticks: u64,
    pub duration_ticks: i64,
    /// Velocity of the opening note-on
    pub velocity: u8,
}

/// Extract the ordered list of notes contained in one track.
///
/// Notes are emitted in the order their closing event occurs, which is not
/// necessarily sorted by onset. A second note-on for an already-sounding pitch
/// overwrites the open entry (the earlier onset is discarded), a note-off with
/// no matching open entry is ignored, and entries still open at end of track
/// produce nothing. These are tolerated input quirks, not errors.
pub fn assemble_notes(track: &Track<'_>) -> Result<Vec<Note>> {
    let mut notes = Vec::new();
    let mut abs_time = 0u64;
    // pitch -> (start_ticks, velocity), at most one open entry per pitch
    let mut open_notes: HashMap<u8, (u64, u8)> = HashMap::new();

    for event in &track.events {
        abs_time += u64::from(event.delta_ticks);

        match event.kind {
            EventKind::NoteOn {
                pitch, velocity, ..
            } if velocity > 0 => {
                validate_note_fields(track.index, pitch, velocity)?;
                open_notes.insert(pitch, (abs_time, velocity));
            }
            EventKind::NoteOn { pitch, .. } | EventKind::NoteOff { pitch, .. } => {
                validate_note_fields(track.index, pitch, 0)?;
                if let Some((start_ticks, velocity)) = open_notes.remove(&pitch) {
                    notes.push(Note {
                        track: track.index,
                        pitch,
                        start_ticks,
                        duration_ticks: abs_time as i64 - start_ticks as i64,
                        velocity,
                    });
                }
            }
            // Opaque events advance the timeline but never produce a note
            EventKind::Other(_) => {}
        }
    }

    Ok(notes)
}

fn validate_note_fields(track_index: usize, pitch: u8, velocity: u8) -> Result<()> {
    if pitch > MAX_MIDI_VALUE {
        return Err(MotifError::MalformedInput(format!(
            "pitch {} out of range 0-127 in track {}",
            pitch, track_index
        )));
    }
    if velocity > MAX_MIDI_VALUE {
        return Err(MotifError::MalformedInput(format!(
            "velocity {} out of range 0-127 in track {}",
            velocity, track_index
        )));
    }
    Ok(())
}
