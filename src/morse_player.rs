use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex, PoisonError,
};
use std::time::Duration;

use tokio::{task::JoinHandle, time::sleep};
use tracing::{debug, error, warn};

use crate::codec::MorseCodec;
use crate::config::{GapMode, PlayerConfig};
use crate::error::{ConfigError, MorseError, ToneError};
use crate::tone::ToneKind;

pub type UnitPlayedCallback = Box<dyn FnMut() + Send + 'static>;

/// Something that can start a dot or dash tone without blocking.
pub trait ToneProvider: Send + 'static {
    fn trigger(&mut self, kind: ToneKind) -> Result<(), ToneError>;

    fn play_dot(&mut self) -> Result<(), ToneError> {
        self.trigger(ToneKind::Dot)
    }

    fn play_dash(&mut self) -> Result<(), ToneError> {
        self.trigger(ToneKind::Dash)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
}

/// Outcome of one session, from `play` to its last tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionReport {
    /// Dots and dashes emitted, each with one `on_unit_played` call.
    pub units_played: usize,
    /// Units whose tone could not be started. These were silent.
    pub tone_failures: usize,
    /// True when every unit was emitted, false when the session was stopped early.
    pub completed: bool,
}

#[derive(Debug, Clone, Copy)]
struct Timing {
    dot: Duration,
    dash: Duration,
    gap_mode: GapMode,
}

struct Ticker<P: ToneProvider> {
    code: Vec<u8>,
    cursor: usize,
    is_playing: Arc<AtomicBool>,
    provider: Arc<Mutex<P>>,
    on_unit_played: UnitPlayedCallback,
    timing: Timing,
    report: SessionReport,
}

impl<P: ToneProvider> Ticker<P> {
    /// Emits the unit under the cursor and returns how long to wait before the
    /// next tick, or `None` once the session is over.
    fn tick(&mut self) -> Option<Duration> {
        if !self.is_playing.load(Ordering::SeqCst) || self.cursor >= self.code.len() {
            return None;
        }
        let pause = match self.code[self.cursor] {
            b'.' => {
                self.emit(ToneKind::Dot);
                self.cursor += 1;
                self.timing.dot
            }
            b'-' => {
                self.emit(ToneKind::Dash);
                self.cursor += 1;
                self.timing.dash
            }
            _ => {
                let run = match self.timing.gap_mode {
                    GapMode::PerCharacter => 1,
                    GapMode::Coalesced => self.code[self.cursor..]
                        .iter()
                        .take_while(|b| **b == b' ')
                        .count(),
                };
                self.cursor += run;
                self.timing.dot * run as u32
            }
        };
        Some(pause)
    }

    fn emit(&mut self, kind: ToneKind) {
        let triggered = self
            .provider
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .trigger(kind);
        if let Err(e) = triggered {
            self.report.tone_failures += 1;
            warn!(%kind, error = %e, position = self.cursor, "Tone did not play");
        }
        self.report.units_played += 1;
        (self.on_unit_played)();
    }

    fn finish(mut self) -> SessionReport {
        self.is_playing.store(false, Ordering::SeqCst);
        self.report.completed = self.cursor >= self.code.len();
        self.report
    }
}

async fn run_session<P: ToneProvider>(mut ticker: Ticker<P>) -> SessionReport {
    while let Some(pause) = ticker.tick() {
        sleep(pause).await;
    }
    let report = ticker.finish();
    debug!(
        units_played = report.units_played,
        tone_failures = report.tone_failures,
        completed = report.completed,
        "Playback session ended"
    );
    report
}

struct Session {
    is_playing: Arc<AtomicBool>,
    task: JoinHandle<SessionReport>,
}

/// Plays text as Morse tones, one session at a time.
///
/// Each session runs as a tokio task that ticks through the spaced Morse string.
/// `stop` is cooperative: it clears the session's playing flag, and the session
/// ends at its next tick, which may still be up to one dash away.
pub struct PlaybackScheduler<P: ToneProvider> {
    codec: MorseCodec,
    timing: Timing,
    provider: Arc<Mutex<P>>,
    session: Option<Session>,
}

impl<P: ToneProvider> PlaybackScheduler<P> {
    /// Fails if `config` does not validate.
    pub fn new(provider: P, config: &PlayerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(PlaybackScheduler {
            codec: MorseCodec::new(),
            timing: Timing {
                dot: config.dot_duration(),
                dash: config.dash_duration(),
                gap_mode: config.gap_mode,
            },
            provider: Arc::new(Mutex::new(provider)),
            session: None,
        })
    }

    /// Starts playing `text`, stopping any session already running.
    ///
    /// `on_unit_played` runs once per dot or dash, right after its tone is
    /// triggered. The first unit plays without an initial delay. Must be called
    /// from within a tokio runtime.
    pub fn play<F>(&mut self, text: &str, on_unit_played: F) -> Result<(), MorseError>
    where
        F: FnMut() + Send + 'static,
    {
        self.stop();
        let code = self.codec.encode_with_spacing(text)?;
        debug!(chars = code.len(), "Starting playback session");

        let is_playing = Arc::new(AtomicBool::new(true));
        let ticker = Ticker {
            code: code.into_bytes(),
            cursor: 0,
            is_playing: is_playing.clone(),
            provider: self.provider.clone(),
            on_unit_played: Box::new(on_unit_played),
            timing: self.timing,
            report: SessionReport::default(),
        };
        let task = tokio::spawn(run_session(ticker));
        self.session = Some(Session { is_playing, task });
        Ok(())
    }

    /// Asks the active session to end. Safe to call at any time, any number of times.
    pub fn stop(&self) {
        if let Some(session) = &self.session {
            if session.is_playing.swap(false, Ordering::SeqCst) {
                debug!("Stop requested");
            }
        }
    }

    /// `Playing` until the session's final tick has run, even after `stop`.
    pub fn state(&self) -> PlaybackState {
        match &self.session {
            Some(session) if !session.task.is_finished() => PlaybackState::Playing,
            _ => PlaybackState::Idle,
        }
    }

    pub async fn wait(&mut self) -> Option<SessionReport> {
        let session = self.session.take()?;
        match session.task.await {
            Ok(report) => Some(report),
            Err(e) => {
                error!(error = %e, "Playback session failed");
                None
            }
        }
    }

    /// How long playing `text` from start to finish would take.
    pub fn estimate_duration(&self, text: &str) -> Result<Duration, MorseError> {
        let code = self.codec.encode_with_spacing(text)?;
        Ok(code
            .bytes()
            .map(|b| match b {
                b'-' => self.timing.dash,
                _ => self.timing.dot,
            })
            .sum())
    }

    /// Runs `f` with the tone provider locked, between ticks of any active session.
    pub fn with_provider<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        let mut provider = self.provider.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut provider)
    }

    pub fn codec(&self) -> &MorseCodec {
        &self.codec
    }
}

impl<P: ToneProvider> Drop for PlaybackScheduler<P> {
    fn drop(&mut self) {
        self.stop();
    }
}
