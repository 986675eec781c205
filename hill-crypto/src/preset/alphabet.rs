use lazy_static::lazy_static;
use std::collections::HashMap;

/// Number of letters in the cipher alphabet, and so the modulus of every computation.
pub const ALPHABET_SIZE: u64 = 26;

/// Letter appended to plaintext until its length is a multiple of the key order.
pub const PADDING_LETTER: char = 'Z';

/// Numeric value of [`PADDING_LETTER`].
pub const PADDING_INDEX: i64 = (PADDING_LETTER as u8 - b'A') as i64;

lazy_static! {
    /// A static HashMap mapping an index (0 to 25) to its corresponding
    /// uppercase letter (A-Z).
    pub static ref INDEX_TO_LETTER_MAP: HashMap<u8, char> = {
        let mut map = HashMap::new();

        for (index, letter) in ('A'..='Z').enumerate() {
            map.insert(index as u8, letter);
        }

        map
    };

    /// A static HashMap mapping an uppercase letter (A-Z) to its
    /// corresponding index (0 to 25).
    pub static ref LETTER_TO_INDEX_MAP: HashMap<char, u8> = {
        let mut map = HashMap::new();

        for (&index, &letter) in INDEX_TO_LETTER_MAP.iter() {
            map.insert(letter, index);
        }

        map
    };
}

/// Value of `letter` in the alphabet (A = 0 … Z = 25), if it belongs to it.
pub fn letter_to_index(letter: char) -> Option<i64> {
    LETTER_TO_INDEX_MAP.get(&letter).map(|&index| index as i64)
}

/// Letter for an already reduced value; anything outside `[0, 25]` yields `None`.
pub fn index_to_letter(index: i64) -> Option<char> {
    u8::try_from(index)
        .ok()
        .and_then(|index| INDEX_TO_LETTER_MAP.get(&index).copied())
}
