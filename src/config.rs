//! Player configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! dot_duration_ms = 60
//! tone_frequency_hz = 700.0
//! gap_mode = "per_character"
//!
//! [[sound_sets]]
//! name = "bird"
//! dot = "bird_dot.wav"
//! dash = "bird_dash.wav"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// How the player waits through the spaces of a spaced Morse string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapMode {
    /// One dot-length wait per space character.
    PerCharacter,
    /// One wait covering a whole run of spaces. Same total silence, fewer ticks.
    #[default]
    Coalesced,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SoundSetConfig {
    pub name: String,
    pub dot: PathBuf,
    pub dash: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub dot_duration_ms: u64,
    pub tone_frequency_hz: f32,
    pub sample_rate: u32,
    pub volume: f32,
    pub gap_mode: GapMode,
    /// Directory the sound set paths are relative to.
    pub asset_root: PathBuf,
    pub sound_sets: Vec<SoundSetConfig>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            dot_duration_ms: 75,
            tone_frequency_hz: 587.0,
            sample_rate: 48000,
            volume: 0.5,
            gap_mode: GapMode::default(),
            asset_root: PathBuf::from("static/sounds"),
            sound_sets: vec![
                SoundSetConfig {
                    name: "cat".to_string(),
                    dot: PathBuf::from("cat_dot.wav"),
                    dash: PathBuf::from("cat_dash.wav"),
                },
                SoundSetConfig {
                    name: "dog".to_string(),
                    dot: PathBuf::from("dog_dot.wav"),
                    dash: PathBuf::from("dog_dash.wav"),
                },
            ],
        }
    }
}

impl PlayerConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: PlayerConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.dot_duration_ms == 0 {
            return Err(ConfigError::Invalid("dot_duration_ms must be positive".into()));
        }
        if self.sample_rate == 0 {
            return Err(ConfigError::Invalid("sample_rate must be positive".into()));
        }
        let nyquist = self.sample_rate as f32 / 2.0;
        if !(self.tone_frequency_hz > 0.0 && self.tone_frequency_hz < nyquist) {
            return Err(ConfigError::Invalid(format!(
                "tone_frequency_hz must be between 0 and {nyquist}, got {}",
                self.tone_frequency_hz
            )));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(ConfigError::Invalid(format!(
                "volume must be between 0.0 and 1.0, got {}",
                self.volume
            )));
        }
        Ok(())
    }

    pub fn dot_duration(&self) -> Duration {
        Duration::from_millis(self.dot_duration_ms)
    }

    pub fn dash_duration(&self) -> Duration {
        self.dot_duration() * 3
    }
}
