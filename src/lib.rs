pub mod cli;
pub mod cs;
pub mod error;

pub use cs::{combinatorial, ecc};
pub use cs::ecc::{BlockCode, Decoding, ReedMuller, Word, WordSlice};
pub use error::{Error, Result};
