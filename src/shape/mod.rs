//! Length normalization and sliding-window assembly.

mod fixed_length;
mod window;

pub use fixed_length::{fixed_length, FixedLengthUnit};
pub use window::{SlidingWindowUnit, WindowTensor};
