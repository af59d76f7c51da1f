pub mod alphabet;
pub mod codec;
pub mod config;
pub mod error;
pub mod morse_player;
pub mod output;
pub mod progress;
pub mod tone;

pub use alphabet::{AlphabetTable, STANDARD_ALPHABET};
pub use codec::{MorseCodec, MorseUnit};
pub use config::{GapMode, PlayerConfig, SoundSetConfig};
pub use error::{ConfigError, MorseError, ToneError};
pub use morse_player::{PlaybackScheduler, PlaybackState, SessionReport, ToneProvider};
pub use output::{AudioOutput, TonePlayer, ToneSink};
pub use progress::ProgressDisplay;
pub use tone::{Tone, ToneKind, ToneLibrary, ToneSet};
