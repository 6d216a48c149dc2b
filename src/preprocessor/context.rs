//! Fitted, read-only processing state.

use crate::hashing::Vocabulary;

/// Expected `(window_nb, dims * sliding_window)` shape of one side.
pub type InputShape = (usize, usize);

/// State produced by `fit` and shared by every later `transform`.
///
/// Immutable once built; a new fit replaces the whole context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingContext {
    vocabulary: Vocabulary,
    input_shapes: [InputShape; 2],
}

impl ProcessingContext {
    /// Builds a context for the given vocabulary and window geometry.
    pub fn new(vocabulary: Vocabulary, window_nb: usize, sliding_window: usize) -> Self {
        let shape = (window_nb, vocabulary.dims() * sliding_window);
        Self {
            vocabulary,
            input_shapes: [shape, shape],
        }
    }

    /// The frozen vocabulary.
    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Hashed vector width (distinct terms + OOV slot).
    #[inline]
    pub fn dims(&self) -> usize {
        self.vocabulary.dims()
    }

    /// Expected left and right tensor shapes.
    #[inline]
    pub fn input_shapes(&self) -> [InputShape; 2] {
        self.input_shapes
    }

    /// True when fit saw no terms and only the OOV slot exists.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.vocabulary.is_empty()
    }
}
