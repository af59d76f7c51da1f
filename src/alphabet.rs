use crate::error::MorseError;

/// Bidirectional mapping between supported characters and their Morse codes.
///
/// Codes are strings over `.` and `-` with no spaces. The reverse lookup scans
/// every entry, so no two characters may share a code.
#[derive(Debug)]
pub struct AlphabetTable {
    entries: &'static [(char, &'static str)],
}

/// The one table every codec uses.
///
/// `-` carries the code `..--.-`; the code `-....-` has no character.
pub static STANDARD_ALPHABET: AlphabetTable = AlphabetTable {
    entries: &[
        // letters
        ('a', ".-"), ('b', "-..."), ('c', "-.-."), ('d', "-.."), ('e', "."),
        ('f', "..-."), ('g', "--."), ('h', "...."), ('i', ".."), ('j', ".---"),
        ('k', "-.-"), ('l', ".-.."), ('m', "--"), ('n', "-."), ('o', "---"),
        ('p', ".--."), ('q', "--.-"), ('r', ".-."), ('s', "..."), ('t', "-"),
        ('u', "..-"), ('v', "...-"), ('w', ".--"), ('x', "-..-"), ('y', "-.--"),
        ('z', "--.."),
        // digits
        ('1', ".----"), ('2', "..---"), ('3', "...--"), ('4', "....-"), ('5', "....."),
        ('6', "-...."), ('7', "--..."), ('8', "---.."), ('9', "----."), ('0', "-----"),
        // punctuation
        ('.', ".-.-.-"), (',', "--..--"), ('?', "..--.."), ('\'', ".----."),
        ('/', "-..-."), ('(', "-.--."), (')', "-.--.-"), ('&', ".-..."),
        (':', "---..."), (';', "-.-.-."), ('=', "-...-"), ('+', ".-.-."),
        ('-', "..--.-"), ('"', ".-..-."), ('$', "...-..-"),
        ('!', "-.-.--"), ('@', ".--.-."),
    ],
};

impl AlphabetTable {
    /// Code for `symbol`, matched case-insensitively.
    pub fn code_for(&self, symbol: char) -> Result<&'static str, MorseError> {
        let lowered = symbol.to_ascii_lowercase();
        self.entries
            .iter()
            .find(|(ch, _)| *ch == lowered)
            .map(|(_, code)| *code)
            .ok_or(MorseError::UnknownSymbol(symbol))
    }

    /// Character whose code equals `code` exactly. Spaces are not stripped here.
    pub fn symbol_for(&self, code: &str) -> Result<char, MorseError> {
        self.entries
            .iter()
            .find(|(_, c)| *c == code)
            .map(|(ch, _)| *ch)
            .ok_or_else(|| MorseError::UnknownCode(code.to_string()))
    }

    pub fn symbols(&self) -> impl Iterator<Item = char> + '_ {
        self.entries.iter().map(|(ch, _)| *ch)
    }
}
