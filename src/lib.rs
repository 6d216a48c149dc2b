//! # CDSSM Preprocessor
//!
//! Turns query/document text pairs into the fixed-shape letter n-gram window
//! tensors consumed by a sliding-window convolutional matching model (CDSSM).
//!
//! ## Overview
//!
//! Each text goes through a fixed pipeline:
//!
//! 1. Normalization: tokenize, lowercase, drop punctuation and stopwords
//! 2. Letter n-grams of every token (`#token#`, n = `sliding_window`)
//! 3. Word hashing: one row of n-gram counts per token, `dims` wide
//! 4. Pad/truncate to `window_nb + sliding_window - 1` rows
//! 5. Stride-1 sliding windows of `sliding_window` rows
//!
//! `fit` builds the vocabulary (`dims` = distinct n-grams + 1 OOV slot) and
//! `transform` applies the frozen vocabulary. Both passes share the same unit
//! chain, so shapes and values agree between training and inference.
//!
//! ## Quick Start
//!
//! ```rust
//! use cdssm_preprocessor::{CdssmPreprocessor, Config, Stage, TextPair};
//!
//! let train = vec![
//!     TextPair::labeled("id0", "id1", "beijing", "Beijing is capital of China", 1.0),
//!     TextPair::labeled("id0", "id2", "beijing", "China is in east Asia", 0.0),
//! ];
//!
//! let mut preprocessor = CdssmPreprocessor::new(Config::default())?;
//! let pack = preprocessor.fit_transform(&train, Stage::Train)?;
//! assert_eq!(pack.len(), 2);
//!
//! let test = vec![TextPair::unlabeled("id0", "id4", "beijing", "I visited beijing yesterday.")];
//! let pack = preprocessor.transform(&test, Stage::Test)?;
//! let [left_shape, _] = pack.context.input_shapes();
//! assert_eq!(pack.left_of("id0").unwrap().dim(), left_shape);
//! # Ok::<(), cdssm_preprocessor::PreprocessError>(())
//! ```
//!
//! ## Architecture
//!
//! - [`text`] - Tokenization and the normalization unit chain
//! - [`hashing`] - Letter n-grams, vocabulary and word hashing
//! - [`shape`] - Pad/truncate and sliding windows
//! - [`datapack`] - Text pair records, segmentation and the output container
//! - [`preprocessor`] - The fit/transform orchestrator and its context
//! - [`corpus`] - Reading text pair files

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod corpus;
pub mod datapack;
pub mod error;
pub mod hashing;
pub mod preprocessor;
pub mod shape;
pub mod text;

// Re-export commonly used types
pub use config::{Config, PadMode, PreprocessorConfig, TextConfig, TruncateMode};
pub use datapack::{DataPack, Entry, Frame, Relation, Segmented, Stage, TextPair};
pub use error::{PreprocessError, Result};
pub use hashing::{NgramLetterUnit, TermHasher, Vocabulary, OOV_INDEX};
pub use preprocessor::{CdssmPreprocessor, InputShape, ProcessingContext};
pub use shape::{fixed_length, FixedLengthUnit, SlidingWindowUnit, WindowTensor};
pub use text::{Normalizer, ProcessUnit};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
