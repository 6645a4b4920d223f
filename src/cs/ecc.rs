//! Error correction code implementations.
//!
//! This module provides binary block codes over GF(2):
//! - Reed-Muller codes RM(r, m) with majority-logic (Reed) decoding
//!
//! # Error Correction Algorithms
//!
//! A block code maps a fixed-length message to a longer, redundant codeword. The
//! redundancy lets the decoder recover the message even when some bits of the
//! codeword were flipped in transit, up to the code's correction strength.
//!
//! # Examples
//!
//! ```rust
//! use reed_muller::cs::ecc::{format_word, parse_word, Decoding, ReedMuller};
//!
//! let code = ReedMuller::new(1, 3).unwrap();
//! let message = parse_word("1010").unwrap();
//! let codeword = code.encode(&message).unwrap();
//! assert_eq!(format_word(&codeword), "00110011");
//! assert_eq!(code.decode(&codeword).unwrap(), Decoding::Decoded(message));
//! ```

use bitvec::prelude::*;

pub use crate::error::{Error, Result};

/// A vector over GF(2), one bit per coordinate.
pub type Word = BitVec<u8, Msb0>;

/// Borrowed view of a [`Word`].
pub type WordSlice = BitSlice<u8, Msb0>;

/// Outcome of a decode that received a well-formed word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoding {
    /// The decoder settled on this message.
    Decoded(Word),
    /// The decoder could not pick a message without guessing.
    Ambiguous,
}

impl Decoding {
    /// Returns `true` for [`Decoding::Ambiguous`].
    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Decoding::Ambiguous)
    }

    /// The decoded message, if there is one.
    pub fn message(&self) -> Option<&WordSlice> {
        match self {
            Decoding::Decoded(word) => Some(word.as_bitslice()),
            Decoding::Ambiguous => None,
        }
    }

    /// Converts into the decoded message, if there is one.
    pub fn into_message(self) -> Option<Word> {
        match self {
            Decoding::Decoded(word) => Some(word),
            Decoding::Ambiguous => None,
        }
    }
}

/// Trait for binary block codes with fixed message and block lengths
pub trait BlockCode {
    /// Codeword length `n`
    fn block_length(&self) -> usize;

    /// Message length `k`
    fn message_length(&self) -> usize;

    /// Number of bit errors the code is guaranteed to correct
    fn strength(&self) -> usize;

    /// Encode a message of exactly `message_length()` bits
    fn encode(&self, message: &WordSlice) -> Result<Word>;

    /// Decode a received word of exactly `block_length()` bits
    fn decode(&self, received: &WordSlice) -> Result<Decoding>;
}

/// Parses a textual word made of the characters `0` and `1`.
///
/// # Errors
/// Returns [`Error::InvalidSymbol`] for the first character that is neither `0` nor `1`.
pub fn parse_word(text: &str) -> Result<Word> {
    let mut word = Word::with_capacity(text.len());
    for (position, symbol) in text.chars().enumerate() {
        match symbol {
            '0' => word.push(false),
            '1' => word.push(true),
            _ => return Err(Error::InvalidSymbol { symbol, position }),
        }
    }
    Ok(word)
}

/// Builds a word from integer bits, each of which must be 0 or 1.
pub fn word_from_bits(bits: &[u8]) -> Result<Word> {
    let mut word = Word::with_capacity(bits.len());
    for (position, &bit) in bits.iter().enumerate() {
        match bit {
            0 => word.push(false),
            1 => word.push(true),
            _ => {
                return Err(Error::InvalidInput(format!(
                    "bit {} at position {} is not 0 or 1",
                    bit, position
                )))
            }
        }
    }
    Ok(word)
}

/// Renders a word as a string of `0` and `1` characters.
pub fn format_word(word: &WordSlice) -> String {
    word.iter()
        .by_vals()
        .map(|bit| if bit { '1' } else { '0' })
        .collect()
}

/// Reed-Muller codes with majority-logic decoding
pub mod reed_muller;
pub use reed_muller::{table_bits, ReedMuller, MAX_TABLE_BITS};

pub use self_test::{
    exhaustive_self_test, sampled_self_test, Failure, SelfTestReport, MAX_EXHAUSTIVE_TRIALS,
};
