use std::f32::consts::PI;
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ndarray::Array1;
use rodio::buffer::SamplesBuffer;
use rodio::{Decoder, Source};
use tracing::{debug, error};

use crate::config::PlayerConfig;
use crate::error::{ConfigError, ToneError};

const FADE_IN: f32 = 0.0004;
const FADE_OUT: f32 = 0.0002;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToneKind {
    Dot,
    Dash,
}

impl fmt::Display for ToneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToneKind::Dot => write!(f, "dot"),
            ToneKind::Dash => write!(f, "dash"),
        }
    }
}

/// Decoded audio for one tone. Cheap to turn into any number of playable instances.
#[derive(Debug, Clone, PartialEq)]
pub struct Tone {
    channels: u16,
    sample_rate: u32,
    samples: Vec<f32>,
}

impl Tone {
    /// Sine wave at `frequency` lasting `duration`, with a short fade at both ends.
    pub fn sine(frequency: f32, duration: Duration, sample_rate: u32) -> Tone {
        let samples_count = (sample_rate as u128 * duration.as_nanos() / 1_000_000_000) as usize;
        let t = Array1::range(0.0, samples_count as f32, 1.0) / sample_rate as f32;
        let mut wave = (2.0 * PI * frequency * t).mapv(f32::sin);

        let fade_in_samples = ((sample_rate as f32 * FADE_IN) as usize).min(samples_count / 2);
        let fade_out_samples = ((sample_rate as f32 * FADE_OUT) as usize).min(samples_count / 2);
        apply_hann_window(&mut wave, fade_in_samples, fade_out_samples);

        Tone {
            channels: 1,
            sample_rate,
            samples: wave.to_vec(),
        }
    }

    /// Decodes an audio file already read into memory. `path` is only used in errors.
    pub fn decode(path: &Path, bytes: Vec<u8>) -> Result<Tone, ToneError> {
        let decoder = Decoder::new(Cursor::new(bytes)).map_err(|e| ToneError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let channels = decoder.channels();
        let sample_rate = decoder.sample_rate();
        if channels == 0 || sample_rate == 0 {
            return Err(ToneError::Decode {
                path: path.to_path_buf(),
                message: format!("unusable stream ({channels} channels at {sample_rate} Hz)"),
            });
        }
        let samples: Vec<f32> = decoder.convert_samples().collect();
        Ok(Tone {
            channels,
            sample_rate,
            samples,
        })
    }

    pub fn instance(&self) -> SamplesBuffer<f32> {
        SamplesBuffer::new(self.channels, self.sample_rate, self.samples.clone())
    }

    pub fn duration(&self) -> Duration {
        let frames = (self.samples.len() / self.channels as usize) as u64;
        Duration::from_nanos(frames * 1_000_000_000 / self.sample_rate as u64)
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
}

fn apply_hann_window(samples: &mut Array1<f32>, fade_in_samples: usize, fade_out_samples: usize) {
    let hann_in = Array1::linspace(0.0, PI, fade_in_samples).mapv(|x| 0.5 * (1.0 - x.cos()));
    let hann_out = Array1::linspace(PI, 0.0, fade_out_samples).mapv(|x| 0.5 * (1.0 - x.cos()));

    for i in 0..fade_in_samples {
        samples[i] *= hann_in[i];
    }

    let len = samples.len();
    for i in 0..fade_out_samples {
        samples[len - fade_out_samples + i] *= hann_out[i];
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToneSet {
    pub name: String,
    pub dot: Tone,
    pub dash: Tone,
}

impl ToneSet {
    pub fn get(&self, kind: ToneKind) -> &Tone {
        match kind {
            ToneKind::Dot => &self.dot,
            ToneKind::Dash => &self.dash,
        }
    }
}

/// Produces tone sets by id: `0` is the synthesized sine pair, `n` is the n-th
/// configured sample pair.
#[derive(Debug, Clone)]
pub struct ToneLibrary {
    config: PlayerConfig,
}

impl ToneLibrary {
    /// Fails if `config` does not validate.
    pub fn new(config: PlayerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Number of valid ids, including the synthesized set.
    pub fn set_count(&self) -> usize {
        self.config.sound_sets.len() + 1
    }

    pub fn synthesized(&self) -> ToneSet {
        let config = &self.config;
        ToneSet {
            name: "sine".to_string(),
            dot: Tone::sine(config.tone_frequency_hz, config.dot_duration(), config.sample_rate),
            dash: Tone::sine(config.tone_frequency_hz, config.dash_duration(), config.sample_rate),
        }
    }

    /// Loads set `id`. Sample sets only resolve once both files have decoded.
    pub async fn load_set(&self, id: usize) -> Result<ToneSet, ToneError> {
        if id == 0 {
            return Ok(self.synthesized());
        }
        let sound_set = self
            .config
            .sound_sets
            .get(id - 1)
            .ok_or(ToneError::UnknownSet(id))?;

        let dot_path = self.config.asset_root.join(&sound_set.dot);
        let dash_path = self.config.asset_root.join(&sound_set.dash);
        let loaded = tokio::try_join!(load_tone(dot_path), load_tone(dash_path));
        match loaded {
            Ok((dot, dash)) => {
                debug!(set = %sound_set.name, "Loaded tone set");
                Ok(ToneSet {
                    name: sound_set.name.clone(),
                    dot,
                    dash,
                })
            }
            Err(e) => {
                error!(set = %sound_set.name, error = %e, "Failed to load tone set");
                Err(e)
            }
        }
    }
}

async fn load_tone(path: PathBuf) -> Result<Tone, ToneError> {
    let bytes = tokio::fs::read(&path).await.map_err(|source| ToneError::Io {
        path: path.clone(),
        source,
    })?;
    let decode_path = path.clone();
    tokio::task::spawn_blocking(move || Tone::decode(&decode_path, bytes))
        .await
        .map_err(|e| ToneError::Decode {
            path,
            message: e.to_string(),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_length_matches_duration() {
        let tone = Tone::sine(587.0, Duration::from_millis(75), 48000);
        assert_eq!(tone.samples().len(), 3600);
        assert_eq!(tone.duration(), Duration::from_millis(75));
    }

    #[test]
    fn test_sine_is_faded_and_bounded() {
        let tone = Tone::sine(587.0, Duration::from_millis(75), 48000);
        let samples = tone.samples();
        assert_eq!(samples[0], 0.0);
        assert!(samples.last().unwrap().abs() < 1e-3);
        assert!(samples.iter().all(|s| s.abs() <= 1.0));
        assert!(samples.iter().any(|s| s.abs() > 0.9));
    }

    #[test]
    fn test_very_short_sine_does_not_panic() {
        let tone = Tone::sine(587.0, Duration::from_micros(20), 48000);
        assert!(tone.samples().len() <= 1);
    }

    #[test]
    fn test_synthesized_set_uses_unit_durations() {
        let library = ToneLibrary::new(PlayerConfig::default()).unwrap();
        let set = library.synthesized();
        assert_eq!(set.get(ToneKind::Dot).duration(), Duration::from_millis(75));
        assert_eq!(set.get(ToneKind::Dash).duration(), Duration::from_millis(225));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = PlayerConfig {
            sample_rate: 0,
            ..PlayerConfig::default()
        };
        assert!(matches!(ToneLibrary::new(config), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = Tone::decode(Path::new("noise.wav"), vec![1, 2, 3, 4]).unwrap_err();
        assert!(matches!(err, ToneError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_load_unknown_set() {
        let library = ToneLibrary::new(PlayerConfig::default()).unwrap();
        assert_eq!(library.set_count(), 3);
        assert!(matches!(library.load_set(3).await, Err(ToneError::UnknownSet(3))));
    }

    #[tokio::test]
    async fn test_load_missing_asset() {
        let config = PlayerConfig {
            asset_root: PathBuf::from("/nonexistent"),
            ..PlayerConfig::default()
        };
        let library = ToneLibrary::new(config).unwrap();
        assert!(matches!(library.load_set(1).await, Err(ToneError::Io { .. })));
    }
}
