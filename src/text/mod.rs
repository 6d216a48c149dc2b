//! Text processing module: tokenization and the normalization unit chain.

mod normalizer;
mod stopwords;
mod tokenizer;

pub use normalizer::{Normalizer, ProcessUnit};
pub use stopwords::is_stopword;
pub use tokenizer::tokenize;
