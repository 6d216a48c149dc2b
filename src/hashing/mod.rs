//! Letter n-gram extraction, vocabulary building and word hashing.

mod ngram;
mod vocab;

pub use ngram::{NgramLetterUnit, BOUNDARY_MARKER};
pub use vocab::{TermHasher, Vocabulary, OOV_INDEX};
