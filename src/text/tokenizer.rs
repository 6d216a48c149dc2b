//! Tokenization for text processing.

use unicode_segmentation::UnicodeSegmentation;

/// Splits text into word-boundary tokens.
///
/// Whitespace runs are dropped. Punctuation survives as standalone tokens so
/// that the punctuation unit downstream decides what to do with it.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_word_bounds()
        .filter(|segment| !segment.chars().all(char::is_whitespace))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize() {
        let tokens = tokenize("Beijing is capital of China");
        assert_eq!(tokens, vec!["Beijing", "is", "capital", "of", "China"]);
    }

    #[test]
    fn test_punctuation_kept() {
        let tokens = tokenize("Summer in Beijing is hot.");
        assert_eq!(tokens.last().map(String::as_str), Some("."));
        assert_eq!(tokens.len(), 6);
    }

    #[test]
    fn test_empty_and_blank() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n ").is_empty());
    }

    #[test]
    fn test_unicode_tokenization() {
        let tokens = tokenize("Привет мир");
        assert_eq!(tokens, vec!["Привет", "мир"]);
    }
}
