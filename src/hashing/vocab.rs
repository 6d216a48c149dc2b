//! Term vocabulary and word hashing.

use std::collections::HashMap;

/// Index reserved for out-of-vocabulary terms.
pub const OOV_INDEX: usize = 0;

/// Frozen term → index mapping.
///
/// Indices start at 1 in first-seen order; index 0 is the OOV slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    term_index: HashMap<String, usize>,
    /// Terms in index order; `terms[i]` has index `i + 1`.
    terms: Vec<String>,
}

impl Vocabulary {
    /// Builds a vocabulary from a term multiset in a single ordered pass.
    pub fn fit<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vocab = Self::default();
        for term in terms {
            let term = term.as_ref();
            if !vocab.term_index.contains_key(term) {
                vocab.terms.push(term.to_string());
                vocab.term_index.insert(term.to_string(), vocab.terms.len());
            }
        }
        vocab
    }

    /// Index of `term`, or [`OOV_INDEX`] if it was never seen.
    #[inline]
    pub fn index(&self, term: &str) -> usize {
        self.term_index.get(term).copied().unwrap_or(OOV_INDEX)
    }

    /// Returns true if `term` has its own index.
    #[inline]
    pub fn contains(&self, term: &str) -> bool {
        self.term_index.contains_key(term)
    }

    /// Term stored at `index`, if any. The OOV slot has no term.
    pub fn term(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.terms.get(i))
            .map(String::as_str)
    }

    /// Number of distinct terms (OOV slot excluded).
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns true if no term was seen during fit.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Width of a hashed vector: distinct terms plus the OOV slot.
    #[inline]
    pub fn dims(&self) -> usize {
        self.terms.len() + 1
    }

    /// `(term, index)` pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.terms
            .iter()
            .enumerate()
            .map(|(i, term)| (term.as_str(), i + 1))
    }
}

/// Maps terms onto sparse indicator vectors of width `dims`.
#[derive(Debug, Clone, Copy)]
pub struct TermHasher<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> TermHasher<'a> {
    /// Creates a hasher over a frozen vocabulary.
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Self { vocabulary }
    }

    /// Vector width.
    #[inline]
    pub fn dims(&self) -> usize {
        self.vocabulary.dims()
    }

    /// One-hot vector for a single term; unseen terms light up index 0.
    pub fn hash_term(&self, term: &str) -> Vec<f32> {
        let mut hashed = vec![0.0; self.dims()];
        hashed[self.vocabulary.index(term)] = 1.0;
        hashed
    }

    /// Word hashing: the sum of the one-hot vectors of a token's n-grams.
    pub fn hash_token<S: AsRef<str>>(&self, terms: &[S]) -> Vec<f32> {
        let mut hashed = vec![0.0; self.dims()];
        self.accumulate(terms, &mut hashed);
        hashed
    }

    /// Adds the counts of `terms` into an existing row of width `dims`.
    pub fn accumulate<S: AsRef<str>>(&self, terms: &[S], row: &mut [f32]) {
        debug_assert_eq!(row.len(), self.dims());
        for term in terms {
            row[self.vocabulary.index(term.as_ref())] += 1.0;
        }
    }
}
