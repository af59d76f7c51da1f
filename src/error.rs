//! Error types for encoding, decoding, tone handling and configuration.
//!
//! Codec failures are all-or-nothing: an encode or decode call either returns the
//! whole result or one of these errors, never partial output.

use std::path::PathBuf;

use thiserror::Error;

use crate::tone::ToneKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MorseError {
    /// A character outside the supported alphabet was passed to an encoder.
    #[error("Unknown symbol {0:?}: no Morse code for this character")]
    UnknownSymbol(char),

    /// A letter unit did not match any code in the alphabet.
    ///
    /// Input that breaks the gap grammar (a space run other than 1, 3 or 7) also
    /// ends up here, carrying the raw unit that could not be read.
    #[error("Unknown code {0:?}")]
    UnknownCode(String),
}

#[derive(Error, Debug)]
pub enum ToneError {
    /// A tone was triggered before its buffer was available.
    #[error("{0} tone is not loaded")]
    NotReady(ToneKind),

    #[error("No tone set with id {0}")]
    UnknownSet(usize),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// The audio output could not be opened or has shut down.
    #[error("Audio output unavailable: {0}")]
    Output(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config syntax: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
