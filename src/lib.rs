//! MIDI Motif Analysis System
//!
//! Reconstructs discrete notes from raw MIDI event streams, detects the
//! four-note "short-short-short-long" motif (three repeated pitches followed
//! by a minor third below), and transforms occurrences by inverting the
//! closing interval in a cloned stream.
//!
//! The analysis pipeline is pure and synchronous: load or generate an
//! [`EventStream`], assemble notes per track, then either scan the merged
//! timeline for motifs (read path) or rewrite them track by track (write
//! path). File loading, report formatting and the composition generators sit
//! around that core as independent collaborators.

pub mod config;
pub mod error;
pub mod event;
pub mod generate;
pub mod midi;
pub mod motif;
pub mod notes;
pub mod report;
pub mod transform;

pub use error::{MotifError, Result as MotifResult};
pub use event::{Event, EventKind, EventStream, Track};
pub use motif::{detect_motifs, find_motifs, Motif};
pub use notes::{assemble_notes, Note};
pub use transform::transform_motifs;
