//! Fit/transform orchestration.

mod cdssm;
mod context;

pub use cdssm::CdssmPreprocessor;
pub use context::{InputShape, ProcessingContext};
