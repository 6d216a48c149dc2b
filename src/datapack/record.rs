//! Text pair records and stage-aware segmentation.

use crate::datapack::{Frame, Segmented};
use crate::error::{PreprocessError, Result};
use std::fmt;
use std::str::FromStr;

/// Pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Labelled data; the vocabulary is built from it.
    Train,
    /// Unlabelled data, transformed with a frozen vocabulary.
    Test,
}

impl Stage {
    /// Number of fields a record carries at this stage.
    #[inline]
    pub fn arity(&self) -> usize {
        match self {
            Stage::Train => 5,
            Stage::Test => 4,
        }
    }
}

impl FromStr for Stage {
    type Err = PreprocessError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "train" => Ok(Stage::Train),
            "test" => Ok(Stage::Test),
            other => Err(PreprocessError::Config(format!(
                "stage must be `train` or `test`, got `{other}`"
            ))),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Train => "train",
            Stage::Test => "test",
        })
    }
}

/// A query/document pair as read from input.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPair {
    /// Left (query) identifier.
    pub id_left: String,
    /// Right (document) identifier.
    pub id_right: String,
    /// Left raw text.
    pub text_left: String,
    /// Right raw text.
    pub text_right: String,
    /// Relevance label; absent at inference time.
    pub label: Option<f32>,
}

impl TextPair {
    /// Creates a labelled pair.
    pub fn labeled(
        id_left: impl Into<String>,
        id_right: impl Into<String>,
        text_left: impl Into<String>,
        text_right: impl Into<String>,
        label: f32,
    ) -> Self {
        Self {
            id_left: id_left.into(),
            id_right: id_right.into(),
            text_left: text_left.into(),
            text_right: text_right.into(),
            label: Some(label),
        }
    }

    /// Creates an unlabelled pair.
    pub fn unlabeled(
        id_left: impl Into<String>,
        id_right: impl Into<String>,
        text_left: impl Into<String>,
        text_right: impl Into<String>,
    ) -> Self {
        Self {
            id_left: id_left.into(),
            id_right: id_right.into(),
            text_left: text_left.into(),
            text_right: text_right.into(),
            label: None,
        }
    }

    /// Builds a pair from raw fields, checking the arity for `stage`.
    ///
    /// `index` only labels the error.
    pub fn from_fields<S: AsRef<str>>(index: usize, fields: &[S], stage: Stage) -> Result<Self> {
        if fields.len() != stage.arity() {
            return Err(PreprocessError::malformed(
                index,
                format!(
                    "expected {} fields for stage `{}`, got {}",
                    stage.arity(),
                    stage,
                    fields.len()
                ),
            ));
        }

        let field = |i: usize| fields[i].as_ref().to_string();
        let label = match stage {
            Stage::Train => {
                let raw = fields[4].as_ref().trim();
                let label = raw.parse::<f32>().map_err(|_| {
                    PreprocessError::malformed(index, format!("label `{raw}` is not a number"))
                })?;
                Some(label)
            }
            Stage::Test => None,
        };

        Ok(Self {
            id_left: field(0),
            id_right: field(1),
            text_left: field(2),
            text_right: field(3),
            label,
        })
    }
}

/// One row of the relation table.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    /// Left identifier.
    pub id_left: String,
    /// Right identifier.
    pub id_right: String,
    /// Relevance label, if any.
    pub label: Option<f32>,
}

/// Splits pairs into a relation table and de-duplicated left/right text tables.
///
/// Fails on the first record whose label presence does not match `stage`.
/// Ids keep the text of their first occurrence.
pub fn segment(inputs: &[TextPair], stage: Stage) -> Result<Segmented> {
    let mut relation = Vec::with_capacity(inputs.len());
    let mut left = Frame::new();
    let mut right = Frame::new();

    for (index, pair) in inputs.iter().enumerate() {
        match (stage, pair.label) {
            (Stage::Train, None) => {
                return Err(PreprocessError::malformed(
                    index,
                    "train stage records require a label",
                ))
            }
            (Stage::Test, Some(_)) => {
                return Err(PreprocessError::malformed(
                    index,
                    "test stage records must not carry a label",
                ))
            }
            _ => {}
        }

        left.insert(&pair.id_left, || pair.text_left.clone());
        right.insert(&pair.id_right, || pair.text_right.clone());
        relation.push(Relation {
            id_left: pair.id_left.clone(),
            id_right: pair.id_right.clone(),
            label: pair.label,
        });
    }

    Ok(Segmented {
        relation,
        left,
        right,
    })
}
