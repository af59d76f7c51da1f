use morse_player::{MorseCodec, MorseError, STANDARD_ALPHABET};

#[test]
fn test_reference_scenarios() {
    let codec = MorseCodec::new();
    assert_eq!(codec.encode("hi you").unwrap(), "......-.-----..-");
    assert_eq!(
        codec.encode_with_spacing("hi you").unwrap(),
        ". . . .   . .       - . - -   - - -   . . -"
    );
    assert_eq!(
        codec.decode(". . . .   . .       - . - -   - - -   . . -").unwrap(),
        "hi you"
    );
    assert!(codec
        .decode(". . . . . .       - . - -   - - -   . . -")
        .is_err());
}

#[test]
fn test_round_trip_whole_alphabet() {
    let codec = MorseCodec::new();
    let symbols: String = STANDARD_ALPHABET.symbols().collect();
    let text = format!("{symbols} The Quick, brown fox! 1 2 3 @ (ok)?");
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    let spaced = codec.encode_with_spacing(&text).unwrap();
    assert_eq!(codec.decode(&spaced).unwrap(), normalized);
}

#[test]
fn test_round_trip_each_symbol_alone() {
    let codec = MorseCodec::new();
    for symbol in STANDARD_ALPHABET.symbols() {
        let spaced = codec.encode_with_spacing(&symbol.to_string()).unwrap();
        assert_eq!(codec.decode(&spaced).unwrap(), symbol.to_string());
    }
}

#[test]
fn test_spaceless_matches_spaced_without_spaces() {
    let codec = MorseCodec::new();
    for text in ["hello world", "SOS", "  a  b\tc ", "e=mc2", "what's up?"] {
        let plain = codec.encode(text).unwrap();
        let spaced: String = codec
            .encode_with_spacing(text)
            .unwrap()
            .chars()
            .filter(|c| *c != ' ')
            .collect();
        assert_eq!(plain, spaced, "{text:?}");
    }
}

#[test]
fn test_decode_never_returns_partial_text() {
    let codec = MorseCodec::new();
    // "hi" followed by an unknown letter in a second word
    let code = ". . . .   . .       . - - . - . -";
    assert_eq!(
        codec.decode(code),
        Err(MorseError::UnknownCode(".--.-.-".to_string()))
    );
}

#[test]
fn test_uppercase_input_decodes_lowercase() {
    let codec = MorseCodec::new();
    let spaced = codec.encode_with_spacing("Hello World").unwrap();
    assert_eq!(codec.decode(&spaced).unwrap(), "hello world");
}
