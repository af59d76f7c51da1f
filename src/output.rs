//! Getting tones to the speakers.
//!
//! `TonePlayer` is the tone provider used in practice: it holds the current
//! `ToneSet`, keeps one unstarted instance of each tone ready, and hands started
//! instances to a `ToneSink`. `AudioOutput` is the rodio-backed sink.

use std::sync::mpsc;
use std::thread;

use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, Source};
use tracing::{debug, info, warn};

use crate::error::ToneError;
use crate::morse_player::ToneProvider;
use crate::tone::{ToneKind, ToneSet};

/// Somewhere to start one-shot tone instances. Starting must not block.
pub trait ToneSink: Send + 'static {
    fn start(&self, instance: SamplesBuffer<f32>) -> Result<(), ToneError>;
}

/// Default audio device, driven from its own thread.
///
/// Instances are mixed rather than queued, so the tail of one tone may overlap
/// the start of the next.
pub struct AudioOutput {
    tx: mpsc::Sender<SamplesBuffer<f32>>,
}

impl AudioOutput {
    /// Blocks until the device is open. Inside an async runtime, call it through
    /// `spawn_blocking`.
    pub fn open(volume: f32) -> Result<Self, ToneError> {
        let (tx, rx) = mpsc::channel::<SamplesBuffer<f32>>();
        let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<(), String>>(1);

        thread::Builder::new()
            .name("morse-audio".to_string())
            .spawn(move || {
                // the stream must stay on the thread that created it
                let (_stream, stream_handle) = match OutputStream::try_default() {
                    Ok(pair) => {
                        let _ = ready_tx.send(Ok(()));
                        pair
                    }
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                        return;
                    }
                };
                while let Ok(instance) = rx.recv() {
                    if let Err(e) = stream_handle.play_raw(instance.amplify(volume)) {
                        warn!(error = %e, "Failed to start tone");
                    }
                }
                debug!("Audio output closed");
            })
            .map_err(|e| ToneError::Output(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Self { tx }),
            Ok(Err(message)) => Err(ToneError::Output(message)),
            Err(_) => Err(ToneError::Output("audio thread exited during startup".to_string())),
        }
    }
}

impl ToneSink for AudioOutput {
    fn start(&self, instance: SamplesBuffer<f32>) -> Result<(), ToneError> {
        self.tx
            .send(instance)
            .map_err(|_| ToneError::Output("audio thread has stopped".to_string()))
    }
}

pub struct TonePlayer<S: ToneSink> {
    sink: S,
    tones: Option<ToneSet>,
    primed_dot: Option<SamplesBuffer<f32>>,
    primed_dash: Option<SamplesBuffer<f32>>,
}

impl<S: ToneSink> TonePlayer<S> {
    pub fn new(sink: S, tones: ToneSet) -> Self {
        let mut player = Self::unloaded(sink);
        player.set_tones(tones);
        player
    }

    /// A player with no tones yet. Every trigger fails with `NotReady` until
    /// `set_tones` is called.
    pub fn unloaded(sink: S) -> Self {
        Self {
            sink,
            tones: None,
            primed_dot: None,
            primed_dash: None,
        }
    }

    /// Replaces both tones at once. Instances primed from the old set are dropped.
    pub fn set_tones(&mut self, tones: ToneSet) {
        info!(set = %tones.name, "Switched tone set");
        self.primed_dot = Some(tones.dot.instance());
        self.primed_dash = Some(tones.dash.instance());
        self.tones = Some(tones);
    }

    pub fn tones(&self) -> Option<&ToneSet> {
        self.tones.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<S: ToneSink> ToneProvider for TonePlayer<S> {
    fn trigger(&mut self, kind: ToneKind) -> Result<(), ToneError> {
        let tones = self.tones.as_ref().ok_or(ToneError::NotReady(kind))?;
        let primed = match kind {
            ToneKind::Dot => &mut self.primed_dot,
            ToneKind::Dash => &mut self.primed_dash,
        };
        // a started instance is spent, so prime the next one straight away
        let instance = primed.take().unwrap_or_else(|| tones.get(kind).instance());
        *primed = Some(tones.get(kind).instance());
        self.sink.start(instance)
    }
}
