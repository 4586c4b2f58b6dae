//! Configuration for the composition generators
//!
//! Only generation parameters live here. The motif's shape, tolerances and
//! transposition are fixed properties of the pattern being searched for, not
//! configuration.

use crate::error::{MotifError, Result};
use crate::event::MAX_MIDI_VALUE;
use serde::{Deserialize, Serialize};

/// Main generator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerateConfig {
    /// Tick resolution of generated streams
    pub ticks_per_beat: u16,
    pub lorenz: LorenzConfig,
    pub sine: SineConfig,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            ticks_per_beat: 480,
            lorenz: LorenzConfig::default(),
            sine: SineConfig::default(),
        }
    }
}

/// Lorenz attractor melody parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LorenzConfig {
    pub sigma: f64,
    pub rho: f64,
    pub beta: f64,
    /// Euler integration step
    pub dt: f64,
    pub num_steps: usize,
    pub tempo_bpm: f64,
    /// Length of each note in beats
    pub note_duration_beats: f64,
    /// Lowest pitch of the mapped range
    pub base_pitch: u8,
    /// Size of the mapped pitch range in semitones
    pub pitch_span: u8,
    pub velocity_floor: u8,
    pub velocity_span: u8,
}

impl Default for LorenzConfig {
    fn default() -> Self {
        Self {
            sigma: 10.0,
            rho: 28.0,
            beta: 8.0 / 3.0,
            dt: 0.01,
            num_steps: 4000,
            tempo_bpm: 140.0,
            note_duration_beats: 0.25, // Sixteenth notes
            base_pitch: 48,            // Three octaves up from C4
            pitch_span: 36,
            velocity_floor: 60,
            velocity_span: 47,
        }
    }
}

/// Sine wave melody parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SineConfig {
    /// Total duration of the piece in seconds
    pub duration_seconds: u32,
    pub tempo_bpm: f64,
    pub velocity: u8,
    pub center_pitch: u8,
    /// Pitch swing around the center in semitones
    pub pitch_amplitude: f64,
    /// Full sine cycles over the whole piece
    pub cycles: f64,
}

impl Default for SineConfig {
    fn default() -> Self {
        Self {
            duration_seconds: 60,
            tempo_bpm: 60.0,
            velocity: 100,
            center_pitch: 60,
            pitch_amplitude: 12.0,
            cycles: 4.0,
        }
    }
}

/// Validate generator configuration
pub fn validate_config(config: &GenerateConfig) -> Result<()> {
    if config.ticks_per_beat == 0 {
        return Err(MotifError::ConfigValidationFailed(
            "ticks_per_beat must be positive".to_string(),
        ));
    }

    let lorenz = &config.lorenz;
    if lorenz.dt <= 0.0 {
        return Err(MotifError::ConfigValidationFailed(
            "lorenz.dt must be positive".to_string(),
        ));
    }
    if lorenz.num_steps == 0 {
        return Err(MotifError::ConfigValidationFailed(
            "lorenz.num_steps must be positive".to_string(),
        ));
    }
    if lorenz.tempo_bpm <= 0.0 {
        return Err(MotifError::ConfigValidationFailed(
            "lorenz.tempo_bpm must be positive".to_string(),
        ));
    }
    if lorenz.note_duration_beats <= 0.0 {
        return Err(MotifError::ConfigValidationFailed(
            "lorenz.note_duration_beats must be positive".to_string(),
        ));
    }
    if u16::from(lorenz.base_pitch) + u16::from(lorenz.pitch_span) > u16::from(MAX_MIDI_VALUE) {
        return Err(MotifError::ConfigValidationFailed(format!(
            "lorenz pitch range {}..{} leaves 0-127",
            lorenz.base_pitch,
            u16::from(lorenz.base_pitch) + u16::from(lorenz.pitch_span)
        )));
    }
    if u16::from(lorenz.velocity_floor) + u16::from(lorenz.velocity_span)
        > u16::from(MAX_MIDI_VALUE)
    {
        return Err(MotifError::ConfigValidationFailed(format!(
            "lorenz velocity range {}..{} leaves 0-127",
            lorenz.velocity_floor,
            u16::from(lorenz.velocity_floor) + u16::from(lorenz.velocity_span)
        )));
    }

    let sine = &config.sine;
    if sine.duration_seconds == 0 {
        return Err(MotifError::ConfigValidationFailed(
            "sine.duration_seconds must be positive".to_string(),
        ));
    }
    if sine.tempo_bpm <= 0.0 {
        return Err(MotifError::ConfigValidationFailed(
            "sine.tempo_bpm must be positive".to_string(),
        ));
    }
    if sine.velocity > MAX_MIDI_VALUE {
        return Err(MotifError::ConfigValidationFailed(format!(
            "sine.velocity {} leaves 0-127",
            sine.velocity
        )));
    }
    let pitch_low = f64::from(sine.center_pitch) - sine.pitch_amplitude;
    let pitch_high = f64::from(sine.center_pitch) + sine.pitch_amplitude;
    if sine.pitch_amplitude < 0.0 || pitch_low < 0.0 || pitch_high > f64::from(MAX_MIDI_VALUE) {
        return Err(MotifError::ConfigValidationFailed(format!(
            "sine pitch range {}..{} leaves 0-127",
            pitch_low, pitch_high
        )));
    }

    Ok(())
}

/// Load configuration from a JSON file
pub fn load_config<P: AsRef<std::path::Path>>(path: P) -> Result<GenerateConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: GenerateConfig = serde_json::from_str(&content)?;
    validate_config(&config)?;
    Ok(config)
}

/// Save configuration to a JSON file
pub fn save_config<P: AsRef<std::path::Path>>(config: &GenerateConfig, path: P) -> Result<()> {
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
