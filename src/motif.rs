//! Motif detection
//!
//! Searches a note sequence for the four-note "short-short-short-long" motif:
//! three repeated pitches followed by a fourth pitch a minor third below, with
//! the notes back to back. The pattern shape and its tolerances are fixed;
//! everything scales off the stream's ticks-per-beat.
//!
//! The matcher is scope-agnostic: it scans whatever note sequence it is given.
//! `detect_motifs` feeds it every track merged into one time-sorted sequence,
//! while the transformer in `crate::transform` feeds it one track at a time.

use crate::error::{MotifError, Result};
use crate::event::EventStream;
use crate::notes::{assemble_notes, Note};
use serde::{Deserialize, Serialize};

/// Interval in semitones from the repeated pitch down to the final note
pub const MOTIF_INTERVAL: i16 = 3;

/// A detected motif occurrence, keyed by its first note
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motif {
    /// Track of the first note of the window
    pub track: usize,
    /// Onset of the first note in beats, rounded to two decimals
    pub start_beat: f64,
    /// The repeated pitch
    pub pitch: u8,
}

/// Test whether four consecutive notes form the motif.
///
/// Three checks, all of which must hold:
/// 1. Melodic: the first three pitches are equal and the fourth sits a minor
///    third below.
/// 2. Rhythmic: the fourth note is more than twice the average length of the
///    first three, and the first three match each other within a quarter beat.
/// 3. Proximity: each note starts within half a beat of the previous note's
///    end, tolerating small gaps and overlaps.
pub fn matches_motif(window: &[Note], ticks_per_beat: u16) -> bool {
    let (n1, n2, n3, n4) = (&window[0], &window[1], &window[2], &window[3]);
    let tpb = f64::from(ticks_per_beat);

    let is_melodic_match = n1.pitch == n2.pitch
        && n2.pitch == n3.pitch
        && i16::from(n4.pitch) == i16::from(n1.pitch) - MOTIF_INTERVAL;
    if !is_melodic_match {
        return false;
    }

    let short_avg =
        (n1.duration_ticks + n2.duration_ticks + n3.duration_ticks) as f64 / 3.0;
    let is_rhythmic_match = n4.duration_ticks as f64 > 2.0 * short_avg
        && ((n1.duration_ticks - n2.duration_ticks).abs() as f64) < tpb / 4.0
        && ((n2.duration_ticks - n3.duration_ticks).abs() as f64) < tpb / 4.0;
    if !is_rhythmic_match {
        return false;
    }

    gap_ticks(n1, n2) < tpb / 2.0 && gap_ticks(n2, n3) < tpb / 2.0 && gap_ticks(n3, n4) < tpb / 2.0
}

/// Distance between one note's end and the next note's start
fn gap_ticks(prev: &Note, next: &Note) -> f64 {
    let prev_end = prev.start_ticks as i64 + prev.duration_ticks;
    (next.start_ticks as i64 - prev_end).abs() as f64
}

/// Scan a note sequence for every four-note window forming the motif.
///
/// Every starting index is evaluated independently, so overlapping occurrences
/// are all reported. The result is ordered by window start index. Pure and
/// total: an empty or too-short sequence yields an empty result.
pub fn find_motifs(notes: &[Note], ticks_per_beat: u16) -> Result<Vec<Motif>> {
    if ticks_per_beat == 0 {
        return Err(MotifError::MalformedInput(
            "ticks_per_beat must be positive".to_string(),
        ));
    }

    let mut found = Vec::new();
    if notes.len() < 4 {
        return Ok(found);
    }

    for window in notes.windows(4) {
        if matches_motif(window, ticks_per_beat) {
            let first = &window[0];
            found.push(Motif {
                track: first.track,
                start_beat: to_beats(first.start_ticks, ticks_per_beat),
                pitch: first.pitch,
            });
        }
    }

    Ok(found)
}

/// Detect motifs across a whole stream, merging every track's notes into one
/// globally time-sorted sequence before scanning. A motif may therefore span
/// notes from different tracks; it is reported under its first note's track.
pub fn detect_motifs(stream: &EventStream<'_>) -> Result<Vec<Motif>> {
    let mut all_notes = Vec::new();
    for track in &stream.tracks {
        all_notes.extend(assemble_notes(track)?);
    }
    // Stable sort keeps closing order for simultaneous onsets
    all_notes.sort_by_key(|n| n.start_ticks);

    find_motifs(&all_notes, stream.ticks_per_beat)
}

/// Convert an absolute tick position to beats, rounded to two decimals
pub fn to_beats(ticks: u64, ticks_per_beat: u16) -> f64 {
    let beats = ticks as f64 / f64::from(ticks_per_beat);
    (beats * 100.0).round() / 100.0
}
