use crate::codec::MorseCodec;
use crate::error::MorseError;

/// "Pending" and "played" halves of a message's spaceless code.
///
/// The spaceless code has exactly one character per dot or dash, so calling
/// `advance` from `on_unit_played` keeps the split in step with the audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressDisplay {
    code: String,
    split: usize,
}

impl ProgressDisplay {
    pub fn new(codec: &MorseCodec, text: &str) -> Result<Self, MorseError> {
        Ok(Self {
            code: codec.encode(text)?,
            split: 0,
        })
    }

    pub fn advance(&mut self) -> Option<char> {
        let next = self.code[self.split..].chars().next()?;
        self.split += next.len_utf8();
        Some(next)
    }

    pub fn pending(&self) -> &str {
        &self.code[self.split..]
    }

    pub fn played(&self) -> &str {
        &self.code[..self.split]
    }

    pub fn is_done(&self) -> bool {
        self.split == self.code.len()
    }
}
