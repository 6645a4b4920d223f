//! Reed-Muller error correction code implementation.
//!
//! Reed-Muller codes were introduced by David E. Muller in 1954, and Irving S. Reed gave them
//! the majority-logic decoding algorithm that bears his name the same year. The binary code
//! RM(r, m) consists of the evaluation tables of all boolean polynomials in `m` variables of
//! degree at most `r`:
//!
//! - block length `n = 2^m`
//! - message length `k = C(m, 0) + C(m, 1) + ... + C(m, r)`
//! - minimum distance `2^(m - r)`, so up to `2^(m - r - 1) - 1` bit errors are corrected
//!
//! This implementation provides:
//! - Construction of the generator matrix from monomial evaluation vectors
//! - Encoding as a GF(2) product of the message with the generator matrix
//! - Reed's majority-logic decoding, degree by degree, with explicit ambiguity detection
//!
//! # Applications
//!
//! - Deep space telemetry (Mariner 9 used RM(1,5))
//! - Inner codes of concatenated schemes, e.g. post-quantum KEMs
//! - Teaching and reference material for algebraic decoding

use crate::cs::combinatorial::subsets::{binomial_sum, checked_binomial, subsets_up_to};
use crate::cs::ecc::{BlockCode, Decoding, Result, Word, WordSlice};
use crate::error::Error;
use bitvec::prelude::*;
use std::fmt::{Display, Formatter};

/// Largest table footprint, in bits, that [`ReedMuller::new`] agrees to build (1 GiB).
///
/// See [`table_bits`] for what is counted.
pub const MAX_TABLE_BITS: u64 = 1 << 33;

/// Bits held by the tables of RM(r, m), or `None` if the count overflows a `u128`.
///
/// Row `j` of degree `d` votes with `2^(m - d)` cosets of `2^m` bits, so the voting
/// tables hold `sum_{d <= r} C(m, d) * 2^(m - d) * 2^m` bits, growing to
/// `(3^m - 1) * 2^m` at `r = m - 1`. The generator matrix is stored twice, as rows
/// and as columns, for another `2 * k * 2^m`.
pub fn table_bits(order: usize, variables: usize) -> Option<u128> {
    let shift = u32::try_from(variables).ok()?;
    let block_length = 1u128.checked_shl(shift)?;

    let mut vectors: u128 = 0;
    let mut monomials: u128 = 0;
    for degree in 0..=order.min(variables) {
        let count = checked_binomial(variables, degree)?;
        let cosets = 1u128.checked_shl(u32::try_from(variables - degree).ok()?)?;
        vectors = vectors.checked_add(count.checked_mul(cosets)?)?;
        monomials = monomials.checked_add(count)?;
    }

    vectors
        .checked_add(monomials.checked_mul(2)?)?
        .checked_mul(block_length)
}

/// Binary Reed-Muller code RM(r, m) with precomputed encoding and decoding tables.
///
/// All tables are built once in [`ReedMuller::new`] and never modified, so a single
/// instance can serve any number of threads.
#[derive(Debug, Clone)]
pub struct ReedMuller {
    /// Maximum monomial degree (r)
    order: usize,
    /// Number of boolean variables (m)
    variables: usize,
    /// Codeword length, 2^m
    block_length: usize,
    /// Message length, number of monomials of degree at most r
    message_length: usize,
    /// Generator matrix rows, the evaluation vector of each monomial
    rows: Vec<Word>,
    /// Generator matrix columns; column c holds every monomial's value at point c
    columns: Vec<Word>,
    /// Inclusive row range of the monomials of each degree
    degree_ranges: Vec<(usize, usize)>,
    /// Coset indicator vectors that vote on each row's coefficient
    voting_rows: Vec<Vec<Word>>,
}

impl ReedMuller {
    /// Create a new Reed-Muller code RM(r, m)
    ///
    /// # Arguments
    /// * `order` - Maximum monomial degree `r`
    /// * `variables` - Number of boolean variables `m`
    ///
    /// # Returns
    /// A code with its generator matrix and decoding tables built
    ///
    /// # Errors
    /// Returns [`Error::InvalidParameters`] unless `r < m`, and
    /// [`Error::InputTooLarge`] with the table size in bits when it exceeds
    /// [`MAX_TABLE_BITS`]; nothing is allocated in either case
    pub fn new(order: usize, variables: usize) -> Result<Self> {
        if order >= variables {
            return Err(Error::InvalidParameters { order, variables });
        }

        match table_bits(order, variables) {
            Some(bits) if bits <= u128::from(MAX_TABLE_BITS) => {}
            bits => {
                return Err(Error::InputTooLarge {
                    length: bits
                        .and_then(|bits| usize::try_from(bits).ok())
                        .unwrap_or(usize::MAX),
                    max_length: usize::try_from(MAX_TABLE_BITS).unwrap_or(usize::MAX),
                });
            }
        }

        let block_length = 1usize << variables;
        let literals = literal_vectors(variables);

        // Monomial j is the j-th subset in canonical order; every table below is indexed by j.
        let monomials: Vec<Vec<usize>> = subsets_up_to(variables, order).collect();

        let rows: Vec<Word> = monomials
            .iter()
            .map(|support| monomial_vector(&literals, support, block_length))
            .collect();

        let voting_rows: Vec<Vec<Word>> = monomials
            .iter()
            .map(|support| coset_indicators(&literals, support, block_length))
            .collect();

        let columns = transpose(&rows, block_length);

        let mut degree_ranges = Vec::with_capacity(order + 1);
        let mut lower = 0;
        for degree in 0..=order {
            let upper = binomial_sum(variables, degree) - 1;
            degree_ranges.push((lower, upper));
            lower = upper + 1;
        }

        Ok(ReedMuller {
            order,
            variables,
            block_length,
            message_length: rows.len(),
            rows,
            columns,
            degree_ranges,
            voting_rows,
        })
    }

    /// Maximum monomial degree `r`
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of boolean variables `m`
    pub fn variables(&self) -> usize {
        self.variables
    }

    /// Codeword length `n = 2^m`
    pub fn block_length(&self) -> usize {
        self.block_length
    }

    /// Message length `k`, the number of monomials of degree at most `r`
    pub fn message_length(&self) -> usize {
        self.message_length
    }

    /// Number of bit errors guaranteed to be corrected, `2^(m - r - 1) - 1`
    pub fn strength(&self) -> usize {
        (1usize << (self.variables - self.order - 1)) - 1
    }

    /// Minimum Hamming distance between distinct codewords, `2^(m - r)`
    pub fn minimum_distance(&self) -> usize {
        1usize << (self.variables - self.order)
    }

    /// Row `index` of the generator matrix
    pub fn generator_row(&self, index: usize) -> Option<&WordSlice> {
        self.rows.get(index).map(|row| row.as_bitslice())
    }

    /// Inclusive range of generator rows whose monomials have exactly `degree` variables
    pub fn degree_range(&self, degree: usize) -> Option<(usize, usize)> {
        self.degree_ranges.get(degree).copied()
    }

    /// Coset indicators voting on the coefficient of row `index`
    pub fn voting_family(&self, index: usize) -> Option<&[Word]> {
        self.voting_rows.get(index).map(Vec::as_slice)
    }

    /// Encode a message into a codeword
    ///
    /// # Arguments
    /// * `message` - Exactly `message_length()` bits, one coefficient per monomial
    ///
    /// # Returns
    /// The `block_length()`-bit codeword
    ///
    /// # Errors
    /// Returns [`Error::LengthMismatch`] if the message has the wrong length
    pub fn encode(&self, message: &WordSlice) -> Result<Word> {
        if message.len() != self.message_length {
            return Err(Error::LengthMismatch {
                expected: self.message_length,
                actual: message.len(),
            });
        }

        Ok(self
            .columns
            .iter()
            .map(|column| dot(message, column))
            .collect())
    }

    /// Decode a received word with Reed's majority-logic algorithm
    ///
    /// Coefficients are recovered from the highest degree down. Each coefficient is the
    /// strict majority of its coset votes; the contribution of a finished degree is then
    /// cancelled from the received word before the next degree is voted on.
    ///
    /// # Arguments
    /// * `received` - Exactly `block_length()` bits
    ///
    /// # Returns
    /// [`Decoding::Decoded`] with the message, or [`Decoding::Ambiguous`] as soon as any
    /// vote ties
    ///
    /// # Errors
    /// Returns [`Error::LengthMismatch`] if the received word has the wrong length
    pub fn decode(&self, received: &WordSlice) -> Result<Decoding> {
        if received.len() != self.block_length {
            return Err(Error::LengthMismatch {
                expected: self.block_length,
                actual: received.len(),
            });
        }

        let mut residual = received.to_bitvec();
        let mut message = bitvec![u8, Msb0; 0; self.message_length];

        for &(lower, upper) in self.degree_ranges.iter().rev() {
            for pos in lower..=upper {
                let votes = &self.voting_rows[pos];
                let ones = votes.iter().filter(|coset| dot(&residual, coset)).count();
                let zeros = votes.len() - ones;

                if ones == zeros {
                    return Ok(Decoding::Ambiguous);
                }

                message.set(pos, ones > zeros);
            }

            // Peel off this degree's share of the codeword.
            let decided = &message[lower..=upper];
            for (point, column) in self.columns.iter().enumerate() {
                if dot(decided, &column[lower..=upper]) {
                    let flipped = !residual[point];
                    residual.set(point, flipped);
                }
            }
        }

        Ok(Decoding::Decoded(message))
    }
}

impl BlockCode for ReedMuller {
    fn block_length(&self) -> usize {
        ReedMuller::block_length(self)
    }

    fn message_length(&self) -> usize {
        ReedMuller::message_length(self)
    }

    fn strength(&self) -> usize {
        ReedMuller::strength(self)
    }

    fn encode(&self, message: &WordSlice) -> Result<Word> {
        ReedMuller::encode(self, message)
    }

    fn decode(&self, received: &WordSlice) -> Result<Decoding> {
        ReedMuller::decode(self, received)
    }
}

impl Display for ReedMuller {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Reed-Muller code RM({},{}), strength={}",
            self.order,
            self.variables,
            self.strength()
        )
    }
}

/// Mod-2 dot product of two equal-length vectors
fn dot(a: &WordSlice, b: &WordSlice) -> bool {
    a.iter_ones().filter(|&i| b[i]).count() % 2 == 1
}

/// Evaluation vectors of every variable `x_i` and of its negation, as `[x_i, !x_i]`.
///
/// `x_i` is a run of `2^(m-i-1)` ones followed by as many zeros, tiled `2^i` times.
fn literal_vectors(variables: usize) -> Vec<[Word; 2]> {
    let block_length = 1usize << variables;
    (0..variables)
        .map(|i| {
            let run = 1usize << (variables - i - 1);
            let positive: Word = (0..block_length).map(|c| (c / run) % 2 == 0).collect();
            let negative = !positive.clone();
            [positive, negative]
        })
        .collect()
}

/// Evaluation vector of the monomial over `support`; the empty monomial is all ones.
fn monomial_vector(literals: &[[Word; 2]], support: &[usize], block_length: usize) -> Word {
    let mut row = bitvec![u8, Msb0; 1; block_length];
    for &var in support {
        row &= literals[var][0].as_bitslice();
    }
    row
}

/// Indicators of the `2^(m - |support|)` cosets that vote on the monomial over `support`.
///
/// Each assignment of the complementary variables selects, per variable, either its
/// evaluation vector or its negation; the most significant assignment bit belongs to
/// the lowest-indexed complementary variable.
fn coset_indicators(literals: &[[Word; 2]], support: &[usize], block_length: usize) -> Vec<Word> {
    let complement: Vec<usize> = (0..literals.len())
        .filter(|var| !support.contains(var))
        .collect();
    let free = complement.len();

    (0..1usize << free)
        .map(|assignment| {
            let mut coset = bitvec![u8, Msb0; 1; block_length];
            for (p, &var) in complement.iter().enumerate() {
                let negated = (assignment >> (free - 1 - p)) & 1;
                coset &= literals[var][negated].as_bitslice();
            }
            coset
        })
        .collect()
}

/// Columns of a matrix given by its rows
fn transpose(rows: &[Word], width: usize) -> Vec<Word> {
    (0..width)
        .map(|c| rows.iter().map(|row| row[c]).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cs::ecc::{format_word, parse_word};

    fn word(text: &str) -> Word {
        parse_word(text).unwrap()
    }

    #[test]
    fn test_reed_muller_creation() {
        let rm = ReedMuller::new(1, 3).unwrap();
        assert_eq!(rm.order(), 1);
        assert_eq!(rm.variables(), 3);
        assert_eq!(rm.block_length(), 8);
        assert_eq!(rm.message_length(), 4);
        assert_eq!(rm.strength(), 1);
        assert_eq!(rm.minimum_distance(), 4);

        let rm = ReedMuller::new(2, 5).unwrap();
        assert_eq!(rm.block_length(), 32);
        assert_eq!(rm.message_length(), 1 + 5 + 10);
        assert_eq!(rm.strength(), 3);

        let rm = ReedMuller::new(0, 1).unwrap();
        assert_eq!(rm.block_length(), 2);
        assert_eq!(rm.message_length(), 1);
        assert_eq!(rm.strength(), 0);

        let rm = ReedMuller::new(3, 4).unwrap();
        assert_eq!(rm.message_length(), 15);
        assert_eq!(rm.strength(), 0);
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(
            ReedMuller::new(3, 3).unwrap_err(),
            Error::InvalidParameters {
                order: 3,
                variables: 3
            }
        );
        assert!(ReedMuller::new(4, 2).is_err());
        assert!(ReedMuller::new(0, 0).is_err());
    }

    #[test]
    fn test_table_bits() {
        // 20 voting vectors plus 4 rows and 4 columns, 8 bits each
        assert_eq!(table_bits(1, 3), Some(224));
        // RM(0, m): 2^m cosets, one generator row and one column
        assert_eq!(table_bits(0, 16), Some((65_536 + 2) * 65_536));
        // RM(m - 1, m): (3^m - 1) voting vectors
        assert_eq!(table_bits(10, 11), Some((177_146 + 2 * 2047) * 2048));
        assert_eq!(table_bits(0, 200), None);
    }

    #[test]
    fn test_oversized_tables_rejected_before_allocation() {
        let bits = table_bits(14, 15).unwrap();
        assert!(bits > u128::from(MAX_TABLE_BITS));
        assert_eq!(
            ReedMuller::new(14, 15).unwrap_err(),
            Error::InputTooLarge {
                length: usize::try_from(bits).unwrap_or(usize::MAX),
                max_length: usize::try_from(MAX_TABLE_BITS).unwrap_or(usize::MAX)
            }
        );
        assert!(matches!(
            ReedMuller::new(13, 14),
            Err(Error::InputTooLarge { .. })
        ));
        assert!(matches!(
            ReedMuller::new(1, 40),
            Err(Error::InputTooLarge { .. })
        ));

        // Low-order codes over the same number of variables stay within the limit.
        assert!(table_bits(0, 16).unwrap() <= u128::from(MAX_TABLE_BITS));
        assert!(table_bits(10, 11).unwrap() <= u128::from(MAX_TABLE_BITS));
    }

    #[test]
    fn test_generator_rows() {
        let rm = ReedMuller::new(1, 3).unwrap();
        let rows: Vec<String> = (0..4)
            .map(|j| format_word(rm.generator_row(j).unwrap()))
            .collect();
        assert_eq!(rows, vec!["11111111", "11110000", "11001100", "10101010"]);
        assert!(rm.generator_row(4).is_none());

        // x0 * x1 is the first degree-2 monomial
        let rm = ReedMuller::new(2, 3).unwrap();
        assert_eq!(format_word(rm.generator_row(4).unwrap()), "11000000");
        assert_eq!(format_word(rm.generator_row(6).unwrap()), "10001000");
    }

    #[test]
    fn test_degree_ranges() {
        let rm = ReedMuller::new(2, 4).unwrap();
        assert_eq!(rm.degree_range(0), Some((0, 0)));
        assert_eq!(rm.degree_range(1), Some((1, 4)));
        assert_eq!(rm.degree_range(2), Some((5, 10)));
        assert_eq!(rm.degree_range(3), None);
        assert_eq!(rm.message_length(), 11);
    }

    #[test]
    fn test_voting_families_partition_the_cube() {
        let rm = ReedMuller::new(2, 4).unwrap();
        for (degree, expected_size) in [(0usize, 16usize), (1, 8), (2, 4)] {
            let (lower, upper) = rm.degree_range(degree).unwrap();
            for pos in lower..=upper {
                let family = rm.voting_family(pos).unwrap();
                assert_eq!(family.len(), expected_size);

                let mut cover = bitvec![u8, Msb0; 0; 16];
                for coset in family {
                    assert_eq!(coset.count_ones(), 1 << degree);
                    assert!(!(cover.clone() & coset.as_bitslice()).any());
                    cover |= coset.as_bitslice();
                }
                assert!(cover.all());
            }
        }
    }

    #[test]
    fn test_encode_known_codeword() {
        let rm = ReedMuller::new(1, 3).unwrap();
        let codeword = rm.encode(&word("1010")).unwrap();
        assert_eq!(format_word(&codeword), "00110011");

        let decoded = rm.decode(&codeword).unwrap();
        assert_eq!(decoded, Decoding::Decoded(word("1010")));
    }

    #[test]
    fn test_repetition_code() {
        let rm = ReedMuller::new(0, 2).unwrap();
        assert_eq!(rm.block_length(), 4);
        assert_eq!(rm.message_length(), 1);

        assert_eq!(format_word(&rm.encode(&word("1")).unwrap()), "1111");
        assert_eq!(format_word(&rm.encode(&word("0")).unwrap()), "0000");

        for received in ["1111", "1110", "0111", "1011"] {
            assert_eq!(
                rm.decode(&word(received)).unwrap(),
                Decoding::Decoded(word("1"))
            );
        }
        for received in ["0000", "1000", "0010"] {
            assert_eq!(
                rm.decode(&word(received)).unwrap(),
                Decoding::Decoded(word("0"))
            );
        }
        for received in ["1100", "0011", "1010", "0110"] {
            assert_eq!(rm.decode(&word(received)).unwrap(), Decoding::Ambiguous);
        }
    }

    #[test]
    fn test_length_mismatch() {
        let rm = ReedMuller::new(1, 3).unwrap();
        assert_eq!(
            rm.encode(&word("101")),
            Err(Error::LengthMismatch {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(
            rm.encode(&word("10100")),
            Err(Error::LengthMismatch {
                expected: 4,
                actual: 5
            })
        );
        assert_eq!(
            rm.decode(&word("0011001")),
            Err(Error::LengthMismatch {
                expected: 8,
                actual: 7
            })
        );
        assert!(rm.decode(&word("")).is_err());
    }

    #[test]
    fn test_single_error_correction() {
        let rm = ReedMuller::new(1, 3).unwrap();
        let message = word("1101");
        let codeword = rm.encode(&message).unwrap();

        for position in 0..rm.block_length() {
            let mut received = codeword.clone();
            let flipped = !received[position];
            received.set(position, flipped);
            assert_eq!(
                rm.decode(&received).unwrap(),
                Decoding::Decoded(message.clone()),
                "error at position {}",
                position
            );
        }
    }

    #[test]
    fn test_multiple_error_correction() {
        let rm = ReedMuller::new(1, 4).unwrap();
        assert_eq!(rm.strength(), 3);

        let message = word("10110");
        let codeword = rm.encode(&message).unwrap();

        let mut received = codeword.clone();
        for position in [0, 7, 13] {
            let flipped = !received[position];
            received.set(position, flipped);
        }
        assert_eq!(
            rm.decode(&received).unwrap(),
            Decoding::Decoded(message)
        );
    }

    #[test]
    fn test_ambiguous_beyond_strength() {
        let rm = ReedMuller::new(1, 3).unwrap();
        let codeword = rm.encode(&word("0000")).unwrap();

        // Points 0 and 1 fall in different cosets of x0's voting family, which then ties 2-2.
        let mut received = codeword.clone();
        received.set(0, true);
        received.set(1, true);
        assert_eq!(rm.decode(&received).unwrap(), Decoding::Ambiguous);
    }

    #[test]
    fn test_full_order_code() {
        // RM(m-1, m) is the even-weight code; a single error already ties a top-degree vote.
        let rm = ReedMuller::new(2, 3).unwrap();
        assert_eq!(rm.message_length(), 7);
        assert_eq!(rm.strength(), 0);

        let message = word("1011001");
        let codeword = rm.encode(&message).unwrap();
        assert_eq!(codeword.count_ones() % 2, 0);
        assert_eq!(
            rm.decode(&codeword).unwrap(),
            Decoding::Decoded(message)
        );

        for position in 0..rm.block_length() {
            let mut received = codeword.clone();
            let flipped = !received[position];
            received.set(position, flipped);
            assert_eq!(
                rm.decode(&received).unwrap(),
                Decoding::Ambiguous,
                "error at position {}",
                position
            );
        }
    }

    #[test]
    fn test_round_trip_all_messages() {
        let rm = ReedMuller::new(2, 4).unwrap();
        let k = rm.message_length();
        for value in 0u32..(1 << k) {
            let message: Word = (0..k).map(|i| (value >> i) & 1 == 1).collect();
            let codeword = rm.encode(&message).unwrap();
            assert_eq!(codeword.len(), 16);
            assert_eq!(
                rm.decode(&codeword).unwrap(),
                Decoding::Decoded(message)
            );
        }
    }

    #[test]
    fn test_block_code_trait() {
        let rm = ReedMuller::new(1, 3).unwrap();
        let code: &dyn BlockCode = &rm;
        assert_eq!(code.block_length(), 8);
        assert_eq!(code.message_length(), 4);
        assert_eq!(code.strength(), 1);

        let codeword = code.encode(&word("0110")).unwrap();
        assert_eq!(
            code.decode(&codeword).unwrap(),
            Decoding::Decoded(word("0110"))
        );
    }

    #[test]
    fn test_display() {
        let rm = ReedMuller::new(1, 4).unwrap();
        assert_eq!(rm.to_string(), "Reed-Muller code RM(1,4), strength=3");
    }

    #[test]
    fn test_shared_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReedMuller>();

        let rm = std::sync::Arc::new(ReedMuller::new(1, 4).unwrap());
        let handles: Vec<_> = (0..4u8)
            .map(|t| {
                let rm = std::sync::Arc::clone(&rm);
                std::thread::spawn(move || {
                    let message: Word = (0..5).map(|i| (t >> (i % 2)) & 1 == 1).collect();
                    let codeword = rm.encode(&message).unwrap();
                    rm.decode(&codeword).unwrap() == Decoding::Decoded(message)
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap());
        }
    }
}
