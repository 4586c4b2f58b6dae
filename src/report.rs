//! Report rendering
//!
//! Pure formatting over analysis results: the per-track motif report, the
//! flat note-extraction listing, and a JSON view of the motif list.

use crate::error::Result;
use crate::event::{EventKind, EventStream};
use crate::motif::Motif;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Render the motif findings grouped by track.
///
/// Within a track, beat positions are deduplicated and sorted, so overlapping
/// windows that share an onset collapse to a single entry.
pub fn render_motif_report(motifs: &[Motif]) -> String {
    if motifs.is_empty() {
        return "Could not find any instances of the motif.\n".to_string();
    }

    let mut beats_by_track: BTreeMap<usize, Vec<f64>> = BTreeMap::new();
    for motif in motifs {
        beats_by_track.entry(motif.track).or_default().push(motif.start_beat);
    }

    let mut out = String::new();
    writeln!(
        out,
        "Found {} instances of the 'short-short-short-long' motif:",
        motifs.len()
    )
    .unwrap();
    for (track, beats) in &mut beats_by_track {
        beats.sort_by(f64::total_cmp);
        beats.dedup();
        writeln!(out, "  - Track {}: Found at beats {:?}", track, beats).unwrap();
    }
    out
}

/// Render the flat note-on listing for a whole stream, one section per track.
/// Every note-on is listed with its absolute time, zero-velocity ones included.
pub fn render_note_events(stream: &EventStream<'_>, source_name: &str) -> String {
    let mut out = String::new();
    writeln!(out, "Note Extraction from {}", source_name).unwrap();
    writeln!(out, "{}", "-".repeat(40)).unwrap();

    for track in &stream.tracks {
        writeln!(
            out,
            "\n--- Track {}: {} ---",
            track.index,
            track.name.as_deref().unwrap_or("")
        )
        .unwrap();
        for (abs_time, event) in track.iter_absolute() {
            if let EventKind::NoteOn {
                pitch, velocity, ..
            } = event.kind
            {
                writeln!(
                    out,
                    "Time: {}, Note: {}, Velocity: {}",
                    abs_time, pitch, velocity
                )
                .unwrap();
            }
        }
    }
    out
}

/// Serialize the motif list as pretty-printed JSON
pub fn motifs_to_json(motifs: &[Motif]) -> Result<String> {
    Ok(serde_json::to_string_pretty(motifs)?)
}
