//! Segmented input and the transformed data pack.

use crate::datapack::{Frame, Relation};
use crate::preprocessor::ProcessingContext;
use crate::shape::WindowTensor;
use std::sync::Arc;

/// Inputs split into a relation table and unique left/right texts.
#[derive(Debug, Clone, Default)]
pub struct Segmented {
    /// One row per input pair, in input order.
    pub relation: Vec<Relation>,
    /// Unique left texts keyed by `id_left`.
    pub left: Frame<String>,
    /// Unique right texts keyed by `id_right`.
    pub right: Frame<String>,
}

impl Segmented {
    /// Left texts followed by right texts, the order the vocabulary is built in.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.left
            .iter()
            .chain(self.right.iter())
            .map(|entry| entry.content.as_str())
    }
}

/// Output container: window tensors per id plus the fitted context.
#[derive(Debug, Clone)]
pub struct DataPack {
    /// One row per input pair, in input order.
    pub relation: Vec<Relation>,
    /// Left window tensors keyed by `id_left`.
    pub left: Frame<WindowTensor>,
    /// Right window tensors keyed by `id_right`.
    pub right: Frame<WindowTensor>,
    /// Context the tensors were produced with.
    pub context: Arc<ProcessingContext>,
}

impl DataPack {
    /// Number of pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.relation.len()
    }

    /// Returns true if the pack holds no pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.relation.is_empty()
    }

    /// Left tensor for `id_left`.
    pub fn left_of(&self, id: &str) -> Option<&WindowTensor> {
        self.left.get(id)
    }

    /// Right tensor for `id_right`.
    pub fn right_of(&self, id: &str) -> Option<&WindowTensor> {
        self.right.get(id)
    }

    /// Each relation row with its left and right tensors.
    pub fn pairs(&self) -> impl Iterator<Item = (&Relation, &WindowTensor, &WindowTensor)> {
        self.relation.iter().filter_map(move |rel| {
            Some((rel, self.left.get(&rel.id_left)?, self.right.get(&rel.id_right)?))
        })
    }
}
