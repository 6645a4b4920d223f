//! Canonical enumeration of subsets of `{0, ..., n-1}`.
//!
//! Subsets come out ordered by size first, then lexicographically by their sorted
//! indices. Reed-Muller monomials, decoding tables and error patterns are all indexed
//! through this one ordering.
//!
//! # Examples
//! ```
//! use reed_muller::cs::combinatorial::subsets::{combinations, subsets_up_to};
//!
//! let pairs: Vec<Vec<usize>> = combinations(4, 2).collect();
//! assert_eq!(pairs, vec![
//!     vec![0, 1],
//!     vec![0, 2],
//!     vec![0, 3],
//!     vec![1, 2],
//!     vec![1, 3],
//!     vec![2, 3],
//! ]);
//!
//! let small: Vec<Vec<usize>> = subsets_up_to(3, 1).collect();
//! assert_eq!(small, vec![vec![], vec![0], vec![1], vec![2]]);
//! ```

use num_integer::binomial;

/// Lazy iterator over the `k`-element subsets of `{0, ..., n-1}` in lexicographic order.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    indices: Vec<usize>,
    started: bool,
    exhausted: bool,
}

/// Returns all `k`-element subsets of `{0, ..., n-1}`, lexicographically.
///
/// Yields nothing when `k > n` and exactly one empty subset when `k == 0`.
pub fn combinations(n: usize, k: usize) -> Combinations {
    Combinations {
        n,
        indices: (0..k).collect(),
        started: false,
        exhausted: k > n,
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        if !self.started {
            self.started = true;
            return Some(self.indices.clone());
        }

        // Advance the rightmost index that still has room, then reset its tail.
        let k = self.indices.len();
        let mut i = k;
        while i > 0 {
            i -= 1;
            if self.indices[i] < self.n - k + i {
                self.indices[i] += 1;
                for j in i + 1..k {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
                return Some(self.indices.clone());
            }
        }

        self.exhausted = true;
        None
    }
}

/// Returns every subset of `{0, ..., n-1}` with at most `max_size` elements,
/// by increasing size and lexicographically within a size.
pub fn subsets_up_to(n: usize, max_size: usize) -> impl Iterator<Item = Vec<usize>> {
    (0..=max_size.min(n)).flat_map(move |size| combinations(n, size))
}

/// Exact `sum_{i=0}^{r} C(m, i)`, the number of subsets yielded by `subsets_up_to(m, r)`.
pub fn binomial_sum(m: usize, r: usize) -> usize {
    (0..=r.min(m)).map(|i| binomial(m, i)).sum()
}

/// `C(n, k)` computed without overflow, or `None` when it does not fit in a `u128`.
pub fn checked_binomial(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        // acc == C(n, i) here, and C(n, i) * (n - i) is divisible by i + 1.
        acc = acc.checked_mul((n - i) as u128)? / (i as u128 + 1);
    }
    Some(acc)
}
