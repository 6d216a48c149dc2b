//! Error types for the CDSSM preprocessing pipeline.

use thiserror::Error;

/// The main error type for preprocessing operations.
#[derive(Error, Debug)]
pub enum PreprocessError {
    /// `transform` was called before any `fit`.
    #[error("Missing context: the preprocessor must be fitted before transform")]
    MissingContext,

    /// The fit corpus produced no terms at all.
    #[error("Degenerate vocabulary: fit corpus yielded zero terms")]
    DegenerateVocabulary,

    /// Window geometry is inconsistent.
    #[error(
        "Shape invariant violation: text_length {text_length} does not fit \
         {window_nb} windows of {sliding_window} rows"
    )]
    ShapeInvariantViolation {
        /// Configured text length (rows after pad/truncate).
        text_length: usize,
        /// Number of windows.
        window_nb: usize,
        /// Window width in rows.
        sliding_window: usize,
    },

    /// A text pair record does not fit the declared stage.
    #[error("Malformed record at {index}: {reason}")]
    MalformedRecord {
        /// Position of the record in its input (0-based).
        index: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Array shape error.
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for preprocessing operations.
pub type Result<T> = std::result::Result<T, PreprocessError>;

impl PreprocessError {
    /// Shorthand for a [`PreprocessError::MalformedRecord`].
    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        PreprocessError::MalformedRecord {
            index,
            reason: reason.into(),
        }
    }
}
