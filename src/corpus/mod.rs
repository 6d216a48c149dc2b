//! Reading text pair corpora from disk.

mod tsv;

pub use tsv::{parse_pairs, read_pairs};
