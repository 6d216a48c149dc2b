//! Text pair records, segmentation and the data pack container.

mod frame;
mod pack;
mod record;

pub use frame::{Entry, Frame};
pub use pack::{DataPack, Segmented};
pub use record::{segment, Relation, Stage, TextPair};
