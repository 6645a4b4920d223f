pub mod combinatorial;
pub mod ecc;

pub use combinatorial::*;
pub use ecc::*;
