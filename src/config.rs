//! Configuration for the CDSSM preprocessing pipeline.

use crate::error::{PreprocessError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Main configuration for the preprocessor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Window geometry and length normalization.
    pub preprocessor: PreprocessorConfig,

    /// Text normalization units.
    pub text: TextConfig,
}

/// Side on which padding is inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadMode {
    /// Pad before the sequence.
    #[default]
    Pre,
    /// Pad after the sequence.
    Post,
}

/// Side from which excess elements are removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruncateMode {
    /// Drop elements from the front.
    #[default]
    Pre,
    /// Drop elements from the back.
    Post,
}

fn parse_side(s: &str, what: &str) -> Result<bool> {
    match s.to_ascii_lowercase().as_str() {
        "pre" => Ok(true),
        "post" => Ok(false),
        other => Err(PreprocessError::Config(format!(
            "{what} must be `pre` or `post`, got `{other}`"
        ))),
    }
}

impl FromStr for PadMode {
    type Err = PreprocessError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(if parse_side(s, "pad_mode")? { PadMode::Pre } else { PadMode::Post })
    }
}

impl FromStr for TruncateMode {
    type Err = PreprocessError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(if parse_side(s, "truncate_mode")? {
            TruncateMode::Pre
        } else {
            TruncateMode::Post
        })
    }
}

impl fmt::Display for PadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PadMode::Pre => "pre",
            PadMode::Post => "post",
        })
    }
}

impl fmt::Display for TruncateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TruncateMode::Pre => "pre",
            TruncateMode::Post => "post",
        })
    }
}

/// Window geometry and length normalization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessorConfig {
    /// Letter n-gram length and window width (rows per window).
    /// Default: 3.
    pub sliding_window: usize,

    /// Number of windows per text.
    /// Default: 5.
    pub window_nb: usize,

    /// Value used to fill short texts.
    /// Default: 0.0.
    pub pad_value: f32,

    /// Where padding goes.
    /// Default: pre.
    pub pad_mode: PadMode,

    /// Where truncation happens.
    /// Default: pre.
    pub truncate_mode: TruncateMode,

    /// Explicit row count after pad/truncate.
    /// Default: None (derived as `window_nb + sliding_window - 1`).
    #[serde(default)]
    pub text_length: Option<usize>,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            sliding_window: 3,
            window_nb: 5,
            pad_value: 0.0,
            pad_mode: PadMode::Pre,
            truncate_mode: TruncateMode::Pre,
            text_length: None,
        }
    }
}

impl PreprocessorConfig {
    /// Number of token rows a text is normalized to.
    #[inline]
    pub fn text_length(&self) -> usize {
        self.text_length
            .unwrap_or_else(|| self.window_nb.saturating_add(self.sliding_window.saturating_sub(1)))
    }

    /// Checks the window geometry.
    ///
    /// Windows are cut from `text_length` rows at stride 1, so the row count
    /// must equal `window_nb + sliding_window - 1` exactly.
    pub fn validate(&self) -> Result<()> {
        if self.sliding_window == 0 {
            return Err(PreprocessError::Config(
                "sliding_window must be at least 1".to_string(),
            ));
        }
        if self.window_nb == 0 {
            return Err(PreprocessError::Config(
                "window_nb must be at least 1".to_string(),
            ));
        }

        let expected = self
            .window_nb
            .checked_add(self.sliding_window - 1)
            .ok_or_else(|| {
                PreprocessError::Config(format!(
                    "window_nb {} + sliding_window {} overflows usize",
                    self.window_nb, self.sliding_window
                ))
            })?;
        if self.text_length() != expected {
            return Err(PreprocessError::ShapeInvariantViolation {
                text_length: self.text_length(),
                window_nb: self.window_nb,
                sliding_window: self.sliding_window,
            });
        }

        Ok(())
    }
}

/// Text normalization configuration.
///
/// Tokenization always runs; the flags enable the later units, which keep
/// their fixed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    /// Apply Unicode normalization (NFKC) to tokens.
    /// Default: false.
    pub unicode_normalize: bool,

    /// Convert all tokens to lowercase.
    /// Default: true.
    pub lowercase: bool,

    /// Drop tokens made only of punctuation.
    /// Default: true.
    pub remove_punctuation: bool,

    /// Drop English stopwords.
    /// Default: true.
    pub remove_stopwords: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            unicode_normalize: false,
            lowercase: true,
            remove_punctuation: true,
            remove_stopwords: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.preprocessor.sliding_window, 3);
        assert_eq!(config.preprocessor.window_nb, 5);
        assert_eq!(config.preprocessor.text_length(), 7);
        assert!(config.preprocessor.validate().is_ok());
        assert!(config.text.lowercase);
    }

    #[test]
    fn test_explicit_text_length_mismatch() {
        let config = PreprocessorConfig {
            text_length: Some(6),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(PreprocessError::ShapeInvariantViolation { text_length: 6, .. })
        ));

        let config = PreprocessorConfig {
            text_length: Some(7),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_geometry_rejected() {
        let config = PreprocessorConfig {
            sliding_window: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(PreprocessError::Config(_))));

        let config = PreprocessorConfig {
            window_nb: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(PreprocessError::Config(_))));
    }

    #[test]
    fn test_geometry_overflow_rejected() {
        let config = PreprocessorConfig {
            window_nb: usize::MAX,
            sliding_window: 3,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(PreprocessError::Config(_))));

        // Largest representable geometry still validates.
        let config = PreprocessorConfig {
            window_nb: usize::MAX,
            sliding_window: 1,
            ..Default::default()
        };
        assert_eq!(config.text_length(), usize::MAX);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("pre".parse::<PadMode>().unwrap(), PadMode::Pre);
        assert_eq!("POST".parse::<PadMode>().unwrap(), PadMode::Post);
        assert_eq!("post".parse::<TruncateMode>().unwrap(), TruncateMode::Post);
        assert!("middle".parse::<TruncateMode>().is_err());
        assert_eq!(PadMode::Post.to_string(), "post");
    }
}
