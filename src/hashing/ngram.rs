//! Letter n-gram unit.
//!
//! Every token is wrapped in boundary markers (`#token#`) before n-grams are
//! taken, so prefixes and suffixes are distinguishable from word-internal
//! runs. When the wrapped token is still shorter than `n` characters it is
//! right-padded with the marker up to exactly `n`, which guarantees one n-gram
//! for any non-empty token. The empty token yields no n-grams.

/// Boundary marker added around tokens.
pub const BOUNDARY_MARKER: char = '#';

/// Extracts overlapping fixed-length character n-grams from tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NgramLetterUnit {
    n: usize,
}

impl NgramLetterUnit {
    /// Creates an n-gram unit. `n` is clamped to at least 1.
    pub fn new(n: usize) -> Self {
        Self { n: n.max(1) }
    }

    /// The n-gram length.
    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    /// N-grams of a single token, in order of position (stride 1).
    pub fn transform_token(&self, token: &str) -> Vec<String> {
        if token.is_empty() {
            return Vec::new();
        }

        let mut chars: Vec<char> = Vec::with_capacity(token.len() + 2);
        chars.push(BOUNDARY_MARKER);
        chars.extend(token.chars());
        chars.push(BOUNDARY_MARKER);
        if chars.len() < self.n {
            chars.resize(self.n, BOUNDARY_MARKER);
        }

        chars
            .windows(self.n)
            .map(|gram| gram.iter().collect())
            .collect()
    }

    /// N-grams of a token sequence, flattened in token order.
    pub fn transform(&self, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .flat_map(|token| self.transform_token(token))
            .collect()
    }
}

impl Default for NgramLetterUnit {
    fn default() -> Self {
        Self::new(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigrams() {
        let unit = NgramLetterUnit::new(3);
        assert_eq!(
            unit.transform_token("word"),
            vec!["#wo", "wor", "ord", "rd#"]
        );
    }

    #[test]
    fn test_short_token() {
        let unit = NgramLetterUnit::new(3);
        assert_eq!(unit.transform_token("a"), vec!["#a#"]);

        let unit = NgramLetterUnit::new(5);
        assert_eq!(unit.transform_token("a"), vec!["#a###"]);
        assert_eq!(unit.transform_token("abc"), vec!["#abc#"]);
    }

    #[test]
    fn test_empty_token() {
        let unit = NgramLetterUnit::new(3);
        assert!(unit.transform_token("").is_empty());
    }

    #[test]
    fn test_multibyte_chars() {
        let unit = NgramLetterUnit::new(3);
        assert_eq!(unit.transform_token("мир"), vec!["#ми", "мир", "ир#"]);
    }

    #[test]
    fn test_flatten_in_token_order() {
        let unit = NgramLetterUnit::new(3);
        let tokens = vec!["ab".to_string(), "c".to_string()];
        assert_eq!(unit.transform(&tokens), vec!["#ab", "ab#", "#c#"]);
    }

    #[test]
    fn test_unigram() {
        let unit = NgramLetterUnit::new(1);
        assert_eq!(unit.transform_token("ab"), vec!["#", "a", "b", "#"]);
        assert_eq!(NgramLetterUnit::new(0).n(), 1);
    }
}
