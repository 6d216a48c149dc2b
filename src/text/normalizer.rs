//! Text normalization as an ordered chain of process units.

use crate::config::TextConfig;
use crate::text::{is_stopword, tokenize};
use unicode_normalization::UnicodeNormalization;

/// A single step of the normalization chain.
///
/// Every unit maps a token sequence to a token sequence and never fails; a
/// unit may return an empty sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessUnit {
    /// Split each input string on Unicode word boundaries.
    Tokenize,
    /// Apply NFKC normalization to each token.
    UnicodeNormalize,
    /// Lowercase each token.
    Lowercase,
    /// Drop tokens made only of punctuation.
    PuncRemoval,
    /// Drop English stopwords.
    StopRemoval,
}

impl ProcessUnit {
    /// Applies this unit to a token sequence.
    pub fn transform(&self, tokens: Vec<String>) -> Vec<String> {
        match self {
            ProcessUnit::Tokenize => tokens.iter().flat_map(|t| tokenize(t)).collect(),
            ProcessUnit::UnicodeNormalize => tokens
                .into_iter()
                .map(|t| t.nfkc().collect::<String>())
                .collect(),
            ProcessUnit::Lowercase => tokens.into_iter().map(|t| t.to_lowercase()).collect(),
            ProcessUnit::PuncRemoval => tokens
                .into_iter()
                .filter(|t| !t.chars().all(is_punctuation))
                .collect(),
            ProcessUnit::StopRemoval => tokens.into_iter().filter(|t| !is_stopword(t)).collect(),
        }
    }
}

fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || ('\u{2010}'..='\u{205E}').contains(&c)
        || matches!(c, '¡' | '¿' | '«' | '»' | '·' | '、' | '。' | '「' | '」')
}

/// Text normalizer running a fixed, ordered list of units.
#[derive(Debug, Clone)]
pub struct Normalizer {
    units: Vec<ProcessUnit>,
}

impl Normalizer {
    /// Creates a normalizer from configuration.
    ///
    /// Tokenization always comes first; enabled units follow in their fixed order.
    pub fn new(config: &TextConfig) -> Self {
        let mut units = vec![ProcessUnit::Tokenize];
        if config.unicode_normalize {
            units.push(ProcessUnit::UnicodeNormalize);
        }
        if config.lowercase {
            units.push(ProcessUnit::Lowercase);
        }
        if config.remove_punctuation {
            units.push(ProcessUnit::PuncRemoval);
        }
        if config.remove_stopwords {
            units.push(ProcessUnit::StopRemoval);
        }
        Self { units }
    }

    /// Creates a normalizer with default configuration.
    pub fn default_config() -> Self {
        Self::new(&TextConfig::default())
    }

    /// The units this normalizer applies, in order.
    pub fn units(&self) -> &[ProcessUnit] {
        &self.units
    }

    /// Normalizes text into its token sequence.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        self.units
            .iter()
            .fold(vec![text.to_string()], |tokens, unit| unit.transform(tokens))
    }
}
