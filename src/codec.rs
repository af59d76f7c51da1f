//! Text to Morse encoding and spaced-Morse decoding.
//!
//! The spaced form is the interchange format between the codec and the player:
//!
//! ```text
//! "hi you" -> ". . . .   . .       - . - -   - - -   . . -"
//! ```
//!
//! One space separates the dots and dashes of a letter, three spaces separate
//! letters and seven spaces separate words.

use crate::alphabet::{AlphabetTable, STANDARD_ALPHABET};
use crate::error::MorseError;

/// Smallest pieces of a spaced Morse string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorseUnit {
    Dot,
    Dash,
    SymbolGap,
    WordGap,
}

impl MorseUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            MorseUnit::Dot => ".",
            MorseUnit::Dash => "-",
            MorseUnit::SymbolGap => "   ",
            MorseUnit::WordGap => "       ",
        }
    }

    /// Length in time units (1 unit = one dot).
    pub fn units(&self) -> u32 {
        match self {
            MorseUnit::Dot => 1,
            MorseUnit::Dash => 3,
            MorseUnit::SymbolGap => 3,
            MorseUnit::WordGap => 7,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MorseCodec {
    alphabet: &'static AlphabetTable,
}

impl Default for MorseCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl MorseCodec {
    pub fn new() -> Self {
        Self {
            alphabet: &STANDARD_ALPHABET,
        }
    }

    pub fn alphabet(&self) -> &'static AlphabetTable {
        self.alphabet
    }

    /// Encodes `text` with every whitespace character dropped and no separators.
    ///
    /// Fails on the first character outside the alphabet.
    pub fn encode(&self, text: &str) -> Result<String, MorseError> {
        let mut code = String::new();
        for symbol in text.chars().filter(|c| !c.is_whitespace()) {
            code.push_str(self.alphabet.code_for(symbol)?);
        }
        Ok(code)
    }

    /// Encodes `text` into the spaced form used for playback.
    ///
    /// Any run of whitespace counts as one word break; leading and trailing
    /// whitespace is ignored.
    pub fn encode_with_spacing(&self, text: &str) -> Result<String, MorseError> {
        let words = text
            .split_whitespace()
            .map(|word| self.encode_word(word))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(words.join(MorseUnit::WordGap.as_str()))
    }

    fn encode_word(&self, word: &str) -> Result<String, MorseError> {
        let letters = word
            .chars()
            .map(|symbol| {
                let code = self.alphabet.code_for(symbol)?;
                let mut spaced = String::with_capacity(code.len() * 2);
                for (i, element) in code.chars().enumerate() {
                    if i > 0 {
                        spaced.push(' ');
                    }
                    spaced.push(element);
                }
                Ok(spaced)
            })
            .collect::<Result<Vec<_>, MorseError>>()?;
        Ok(letters.join(MorseUnit::SymbolGap.as_str()))
    }

    /// Decodes a spaced Morse string back to lowercase text.
    ///
    /// All or nothing: the first unit that is not a known code, including units
    /// left over by a malformed space run, fails the whole call.
    pub fn decode(&self, code: &str) -> Result<String, MorseError> {
        let mut words = Vec::new();
        for word in code.split(MorseUnit::WordGap.as_str()) {
            let mut decoded = String::new();
            for letter in word.split(MorseUnit::SymbolGap.as_str()) {
                if !is_well_spaced(letter) {
                    return Err(MorseError::UnknownCode(letter.to_string()));
                }
                let compact: String = letter.chars().filter(|c| *c != ' ').collect();
                decoded.push(self.alphabet.symbol_for(&compact)?);
            }
            words.push(decoded);
        }
        Ok(words.join(" "))
    }
}

/// Letter units hold only dots, dashes and single spaces, with no space at
/// either end. Compact units like `..` are fine.
///
/// Space runs of 2, 4, 5 or more than 7 survive the gap splits as stray spaces
/// inside a unit; this rejects them so they never decode to a shorter word.
fn is_well_spaced(letter: &str) -> bool {
    letter.bytes().all(|b| matches!(b, b'.' | b'-' | b' '))
        && !letter.starts_with(' ')
        && !letter.ends_with(' ')
        && !letter.contains("  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const HI_YOU: &str = ". . . .   . .       - . - -   - - -   . . -";

    #[test]
    fn test_encode_spaceless() {
        let codec = MorseCodec::new();
        assert_eq!(codec.encode("hi you").unwrap(), "......-.-----..-");
        assert_eq!(codec.encode("  HI\tyou\n").unwrap(), "......-.-----..-");
        assert_eq!(codec.encode("").unwrap(), "");
    }

    #[test]
    fn test_encode_with_spacing() {
        let codec = MorseCodec::new();
        assert_eq!(codec.encode_with_spacing("hi you").unwrap(), HI_YOU);
        assert_eq!(codec.encode_with_spacing("e").unwrap(), ".");
        assert_eq!(codec.encode_with_spacing("et").unwrap(), ".   -");
    }

    #[test]
    fn test_encode_with_spacing_collapses_whitespace() {
        let codec = MorseCodec::new();
        assert_eq!(codec.encode_with_spacing("  Hi \t\n  YOU ").unwrap(), HI_YOU);
        assert_eq!(codec.encode_with_spacing("   ").unwrap(), "");
    }

    #[test]
    fn test_encode_fails_fast_on_unknown_symbol() {
        let codec = MorseCodec::new();
        assert_eq!(codec.encode("hi #you"), Err(MorseError::UnknownSymbol('#')));
        assert_eq!(
            codec.encode_with_spacing("hi you~"),
            Err(MorseError::UnknownSymbol('~'))
        );
    }

    #[test]
    fn test_decode() {
        let codec = MorseCodec::new();
        assert_eq!(codec.decode(HI_YOU).unwrap(), "hi you");
        assert_eq!(codec.decode(".--.-.").unwrap(), "@");
    }

    #[test]
    fn test_decode_malformed_symbol_gap() {
        let codec = MorseCodec::new();
        let result = codec.decode(". . . . . .       - . - -   - - -   . . -");
        assert_eq!(result, Err(MorseError::UnknownCode("......".to_string())));
    }

    #[test]
    fn test_decode_rejects_off_grammar_space_runs() {
        let codec = MorseCodec::new();
        for gap in [2, 4, 5, 6, 8, 10, 14] {
            let code = format!(".{}.", " ".repeat(gap));
            assert!(codec.decode(&code).is_err(), "{gap} spaces decoded");
        }
        assert!(codec.decode(" .").is_err());
        assert!(codec.decode(". ").is_err());
        assert!(codec.decode(". x").is_err());
    }

    #[test]
    fn test_decode_accepts_compact_letters() {
        let codec = MorseCodec::new();
        assert_eq!(codec.decode("..").unwrap(), "i");
        assert_eq!(codec.decode(". .").unwrap(), "i");
        assert_eq!(codec.decode(".--.-.").unwrap(), "@");
        assert_eq!(codec.decode("....   ..       -.--   ---   ..-").unwrap(), "hi you");
        // compact letters still need well-formed gaps around them
        assert!(codec.decode("..  ..").is_err());
        assert!(codec.decode("..     ..").is_err());
    }

    #[test]
    fn test_decode_empty_input_is_an_unknown_code() {
        let codec = MorseCodec::new();
        assert_eq!(codec.decode(""), Err(MorseError::UnknownCode(String::new())));
    }

    #[test]
    fn test_unit_serialization_widths() {
        assert_eq!(MorseUnit::SymbolGap.as_str().len() as u32, MorseUnit::SymbolGap.units());
        assert_eq!(MorseUnit::WordGap.as_str().len() as u32, MorseUnit::WordGap.units());
        assert_eq!(MorseUnit::Dash.units(), 3 * MorseUnit::Dot.units());
    }
}
