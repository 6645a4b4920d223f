pub mod subsets;

pub use subsets::{binomial_sum, checked_binomial, combinations, subsets_up_to, Combinations};
