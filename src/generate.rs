//! Deterministic composition generators
//!
//! Two melody sources that produce an `EventStream` directly: a Lorenz
//! attractor whose trajectory is mapped onto a C-major pitch range, and a
//! plain sine wave. Both write one track of strictly sequential notes with a
//! leading tempo event, so their output feeds the same analysis pipeline as
//! a loaded file.

use crate::config::GenerateConfig;
use crate::event::{Event, EventStream, Track};
use midly::num::u24;
use midly::{MetaMessage, TrackEventKind};
use std::f64::consts::PI;

/// C-major scale degrees within one octave
const C_MAJOR_SCALE: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Generate a melody by Euler-integrating the Lorenz attractor.
///
/// The y coordinate is normalized over its range onto the configured pitch
/// span and snapped to the C-major scale; the z coordinate maps to velocity.
/// One note per integration step, each a sixteenth by default.
pub fn lorenz_stream(config: &GenerateConfig) -> EventStream<'static> {
    let lorenz = &config.lorenz;

    // Integrate from the conventional starting point near the origin
    let (mut x, mut y, mut z) = (0.1f64, 0.0f64, 0.0f64);
    let mut points = Vec::with_capacity(lorenz.num_steps);
    for _ in 0..lorenz.num_steps {
        let dx = lorenz.sigma * (y - x) * lorenz.dt;
        let dy = (x * (lorenz.rho - z) - y) * lorenz.dt;
        let dz = (x * y - lorenz.beta * z) * lorenz.dt;
        x += dx;
        y += dy;
        z += dz;
        points.push((y, z));
    }

    let (y_min, y_max) = min_max(points.iter().map(|p| p.0));
    let (z_min, z_max) = min_max(points.iter().map(|p| p.1));
    let y_span = (y_max - y_min).max(f64::EPSILON);
    let z_span = (z_max - z_min).max(f64::EPSILON);

    let duration_ticks =
        (lorenz.note_duration_beats * f64::from(config.ticks_per_beat)).round() as u32;

    let mut track = Track::new(0);
    track.events.push(tempo_event(lorenz.tempo_bpm));
    for &(py, pz) in &points {
        let raw_pitch = f64::from(lorenz.base_pitch)
            + f64::from(lorenz.pitch_span) * (py - y_min) / y_span;
        let pitch = snap_to_scale(raw_pitch, &C_MAJOR_SCALE, lorenz.base_pitch);
        let velocity = (f64::from(lorenz.velocity_floor)
            + f64::from(lorenz.velocity_span) * (pz - z_min) / z_span) as u8;

        track.events.push(Event::note_on(0, 0, pitch, velocity));
        track.events.push(Event::note_off(duration_ticks, 0, pitch));
    }
    track
        .events
        .push(Event::other(0, TrackEventKind::Meta(MetaMessage::EndOfTrack)));

    let mut stream = EventStream::new(config.ticks_per_beat);
    stream.tracks.push(track);
    stream
}

/// Generate a melody from a sine wave, one quarter note per beat by default.
/// The wave's frequency sets how quickly the melody rises and falls, its
/// amplitude the range of pitches.
pub fn sine_stream(config: &GenerateConfig) -> EventStream<'static> {
    let sine = &config.sine;

    let num_notes = (f64::from(sine.duration_seconds) * sine.tempo_bpm / 60.0) as usize;
    let duration_ticks = u32::from(config.ticks_per_beat);

    let mut track = Track::new(0);
    track.events.push(tempo_event(sine.tempo_bpm));
    for i in 0..num_notes {
        let phase = 2.0 * PI * sine.cycles * i as f64 / num_notes as f64;
        let pitch = (f64::from(sine.center_pitch) + sine.pitch_amplitude * phase.sin()) as u8;

        track.events.push(Event::note_on(0, 0, pitch, sine.velocity));
        track.events.push(Event::note_off(duration_ticks, 0, pitch));
    }
    track
        .events
        .push(Event::other(0, TrackEventKind::Meta(MetaMessage::EndOfTrack)));

    let mut stream = EventStream::new(config.ticks_per_beat);
    stream.tracks.push(track);
    stream
}

/// Snap a pitch to the nearest note of a scale. Ties go to the lower degree.
fn snap_to_scale(pitch: f64, scale: &[u8], base_pitch: u8) -> u8 {
    let pitch_class = pitch.round() as i32 - i32::from(base_pitch);
    let octave = pitch_class.div_euclid(12);
    let semitone = pitch_class.rem_euclid(12);

    // Strict less-than keeps the lower degree when two are equidistant
    let mut closest_degree = 0i32;
    let mut closest_distance = i32::MAX;
    for &degree in scale {
        let distance = (i32::from(degree) - semitone).abs();
        if distance < closest_distance {
            closest_distance = distance;
            closest_degree = i32::from(degree);
        }
    }

    (i32::from(base_pitch) + octave * 12 + closest_degree) as u8
}

/// Leading tempo meta event for the given BPM
fn tempo_event(tempo_bpm: f64) -> Event<'static> {
    // Microseconds per quarter note
    let tempo_uspq = (60_000_000.0 / tempo_bpm) as u32;
    Event::other(
        0,
        TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo_uspq))),
    )
}

fn min_max(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}
