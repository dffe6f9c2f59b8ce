//! Runtime configuration (`drumgrid.toml`).
//!
//! Every field has a default so a partial file, or none at all, is valid.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub transport: TransportConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub scope: ScopeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Beats per minute
    #[serde(default = "default_tempo")]
    pub tempo: f64,
    /// Interval of the coarse scheduler timer
    #[serde(default = "default_lookahead_ms")]
    pub lookahead_ms: f64,
    /// How far ahead of the audio clock steps are committed
    #[serde(default = "default_schedule_ahead")]
    pub schedule_ahead_secs: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_volume")]
    pub master_volume: f32,
    /// Samples per analysis snapshot
    #[serde(default = "default_tap_resolution")]
    pub tap_resolution: usize,
    /// Seed for the noise buffers used by snare and hi-hat
    #[serde(default = "default_noise_seed")]
    pub noise_seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeConfig {
    /// Fraction of half-height a full-scale sample reaches
    #[serde(default = "default_amplitude_scale")]
    pub amplitude_scale: f32,
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

fn default_tempo() -> f64 {
    120.0
}

fn default_lookahead_ms() -> f64 {
    25.0
}

fn default_schedule_ahead() -> f64 {
    0.1
}

fn default_volume() -> f32 {
    1.0
}

fn default_tap_resolution() -> usize {
    2048
}

fn default_noise_seed() -> u64 {
    0x5eed
}

fn default_amplitude_scale() -> f32 {
    0.9
}

fn default_frame_interval_ms() -> u64 {
    16
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tempo: default_tempo(),
            lookahead_ms: default_lookahead_ms(),
            schedule_ahead_secs: default_schedule_ahead(),
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            master_volume: default_volume(),
            tap_resolution: default_tap_resolution(),
            noise_seed: default_noise_seed(),
        }
    }
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            amplitude_scale: default_amplitude_scale(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> String {
        // Plain structs of numbers always serialize.
        toml::to_string_pretty(self).unwrap_or_default()
    }
}
