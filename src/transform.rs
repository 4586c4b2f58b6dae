//! Motif transformation
//!
//! Rewrites detected motifs in a cloned stream by inverting the final
//! interval: the fourth note, originally a minor third below the repeated
//! pitch, is raised to a minor third above it. Every other event passes
//! through untouched, including the rewritten note's own note-off, which
//! keeps targeting the old pitch.

use crate::error::Result;
use crate::event::{EventKind, EventStream, Track, MAX_MIDI_VALUE};
use crate::motif::{matches_motif, to_beats, MOTIF_INTERVAL};
use crate::notes::{assemble_notes, Note};

/// Transform every non-overlapping motif occurrence in the stream.
///
/// Unlike detection, matching here is strictly per-track: a motif's four notes
/// must all belong to the same track. Each track is scanned left-to-right over
/// its start-sorted notes; an accepted match advances the scan past its whole
/// window so an occurrence embedded in an already-consumed match is never
/// re-matched, while a rejected window advances by a single note.
///
/// The input is never modified. On any error no stream is produced at all; a
/// track without matches comes back as an exact copy.
pub fn transform_motifs<'a>(stream: &EventStream<'a>) -> Result<EventStream<'a>> {
    // Assemble every track up front so no output exists until the whole
    // input has validated
    let mut notes_per_track = Vec::with_capacity(stream.tracks.len());
    for track in &stream.tracks {
        let mut notes = assemble_notes(track)?;
        notes.sort_by_key(|n| n.start_ticks);
        notes_per_track.push(notes);
    }

    let mut transformed = stream.clone();

    for (track_idx, notes) in notes_per_track.iter().enumerate() {
        let mut i = 0;
        while i + 4 <= notes.len() {
            let window = &notes[i..i + 4];
            if !matches_motif(window, stream.ticks_per_beat) {
                i += 1;
                continue;
            }

            let (n1, n4) = (&window[0], &window[3]);
            // Invert the closing interval: minor third below becomes minor
            // third above the repeated pitch
            let inverted = i16::from(n1.pitch) + MOTIF_INTERVAL;
            if inverted <= i16::from(MAX_MIDI_VALUE)
                && rewrite_note_on(&mut transformed.tracks[track_idx], n4, inverted as u8)
            {
                println!(
                    "Transformed motif at beat {} in Track {}",
                    to_beats(n1.start_ticks, stream.ticks_per_beat),
                    track_idx
                );
            }

            // Skip past the notes of this motif to avoid overlapping finds
            i += 4;
        }
    }

    Ok(transformed)
}

/// Rewrite the pitch of the raw note-on event backing `target`.
///
/// Re-walks the track's timeline from zero; the first note-on whose absolute
/// time and pitch match the target is mutated and the scan stops, so if
/// multiple identical onsets share one tick only the earliest changes.
fn rewrite_note_on(track: &mut Track<'_>, target: &Note, new_pitch: u8) -> bool {
    let mut time_cursor = 0u64;
    for event in &mut track.events {
        time_cursor += u64::from(event.delta_ticks);
        if time_cursor != target.start_ticks {
            continue;
        }
        if let EventKind::NoteOn { pitch, .. } = &mut event.kind {
            if *pitch == target.pitch {
                *pitch = new_pitch;
                return true;
            }
        }
    }
    false
}
