//! Morse symbol buffering and letter decoding.

use crate::constants::UNKNOWN_MORSE_CHAR;
use std::{collections::HashMap, fmt};

/// International Morse code for letters and digits
const MORSE_ALPHABET: [(char, &str); 36] = [
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('0', "-----"),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
];

/// One Morse element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MorseSymbol {
    /// Short element, written `.`
    Dot,
    /// Long element, written `-`
    Dash,
}

impl MorseSymbol {
    /// Conventional written mark
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Dot => '.',
            Self::Dash => '-',
        }
    }

    /// Parse a written mark
    #[must_use]
    pub const fn from_char(mark: char) -> Option<Self> {
        match mark {
            '.' => Some(Self::Dot),
            '-' => Some(Self::Dash),
            _ => None,
        }
    }
}

impl fmt::Display for MorseSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Lookup table between symbol sequences and characters
#[derive(Debug, Clone)]
pub struct MorseTable {
    by_code: HashMap<Vec<MorseSymbol>, char>,
    by_char: HashMap<char, Vec<MorseSymbol>>,
}

impl MorseTable {
    /// The standard alphabet (A-Z, 0-9)
    #[must_use]
    pub fn standard() -> Self {
        let mut by_code = HashMap::with_capacity(MORSE_ALPHABET.len());
        let mut by_char = HashMap::with_capacity(MORSE_ALPHABET.len());
        for (letter, code) in MORSE_ALPHABET {
            let symbols: Vec<MorseSymbol> = code.chars().filter_map(MorseSymbol::from_char).collect();
            by_code.insert(symbols.clone(), letter);
            by_char.insert(letter, symbols);
        }
        Self { by_code, by_char }
    }

    /// Character for a symbol sequence
    #[must_use]
    pub fn decode(&self, symbols: &[MorseSymbol]) -> Option<char> {
        self.by_code.get(symbols).copied()
    }

    /// Symbol sequence for a character (case-insensitive)
    #[must_use]
    pub fn encode(&self, letter: char) -> Option<&[MorseSymbol]> {
        self.by_char.get(&letter.to_ascii_uppercase()).map(Vec::as_slice)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Whether the table has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

impl Default for MorseTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Symbols entered since the last letter commit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MorseBuffer {
    symbols: Vec<MorseSymbol>,
}

impl MorseBuffer {
    /// Create an empty buffer
    #[must_use]
    pub const fn new() -> Self {
        Self { symbols: Vec::new() }
    }

    /// Append a symbol
    pub fn push(&mut self, symbol: MorseSymbol) {
        self.symbols.push(symbol);
    }

    /// Decode the buffered symbols and clear the buffer
    ///
    /// Sequences without a table entry, including the empty one, decode to `?`.
    pub fn commit(&mut self, table: &MorseTable) -> char {
        let letter = table.decode(&self.symbols).unwrap_or(UNKNOWN_MORSE_CHAR);
        self.symbols.clear();
        letter
    }

    /// Buffered symbols
    #[must_use]
    pub fn symbols(&self) -> &[MorseSymbol] {
        &self.symbols
    }

    /// Number of buffered symbols
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether nothing is buffered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl fmt::Display for MorseBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols.iter().try_for_each(|symbol| write!(f, "{symbol}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MorseSymbol::{Dash, Dot};

    #[test]
    fn test_table_is_bijective() {
        let table = MorseTable::standard();
        assert_eq!(table.len(), 36);
        for (letter, code) in MORSE_ALPHABET {
            let symbols = table.encode(letter).unwrap();
            assert_eq!(symbols.iter().map(|s| s.as_char()).collect::<String>(), code);
            assert_eq!(table.decode(symbols), Some(letter));
        }
    }

    #[test]
    fn test_commit_known_letter() {
        let table = MorseTable::standard();
        let mut buffer = MorseBuffer::new();
        buffer.push(Dot);
        buffer.push(Dash);
        assert_eq!(buffer.to_string(), ".-");

        assert_eq!(buffer.commit(&table), 'A');
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_commit_unknown_sequence() {
        let table = MorseTable::standard();
        let mut buffer = MorseBuffer::new();
        for symbol in [Dot, Dash, Dot, Dash, Dot, Dash] {
            buffer.push(symbol);
        }
        assert_eq!(buffer.commit(&table), '?');
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_commit_empty_buffer() {
        let table = MorseTable::standard();
        let mut buffer = MorseBuffer::new();
        assert_eq!(buffer.commit(&table), '?');
    }

    #[test]
    fn test_digits() {
        let table = MorseTable::standard();
        assert_eq!(table.decode(&[Dash; 5]), Some('0'));
        assert_eq!(table.decode(&[Dot; 5]), Some('5'));
        assert_eq!(table.encode('s'), Some(&[Dot, Dot, Dot][..]));
    }
}
