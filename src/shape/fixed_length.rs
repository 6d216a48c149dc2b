//! Pad/truncate a flat sequence to an exact length.

use crate::config::{PadMode, TruncateMode};

/// Pads or truncates `seq` to exactly `len` elements.
///
/// Short input is filled with `pad_value` on the `pad_mode` side; long input
/// loses its excess on the `truncate_mode` side.
pub fn fixed_length<T: Clone>(
    mut seq: Vec<T>,
    len: usize,
    pad_value: T,
    pad_mode: PadMode,
    truncate_mode: TruncateMode,
) -> Vec<T> {
    match seq.len() {
        n if n < len => {
            let fill = std::iter::repeat(pad_value).take(len - n);
            match pad_mode {
                PadMode::Pre => fill.chain(seq).collect(),
                PadMode::Post => {
                    seq.extend(fill);
                    seq
                }
            }
        }
        n if n > len => {
            match truncate_mode {
                TruncateMode::Pre => {
                    seq.drain(..n - len);
                }
                TruncateMode::Post => seq.truncate(len),
            }
            seq
        }
        _ => seq,
    }
}

/// Length normalizer with its parameters fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLengthUnit {
    /// Target length.
    pub len: usize,
    /// Fill value.
    pub pad_value: f32,
    /// Pad side.
    pub pad_mode: PadMode,
    /// Truncate side.
    pub truncate_mode: TruncateMode,
}

impl FixedLengthUnit {
    /// Creates a length normalizer.
    pub fn new(len: usize, pad_value: f32, pad_mode: PadMode, truncate_mode: TruncateMode) -> Self {
        Self {
            len,
            pad_value,
            pad_mode,
            truncate_mode,
        }
    }

    /// Applies the normalizer.
    pub fn transform(&self, seq: Vec<f32>) -> Vec<f32> {
        fixed_length(seq, self.len, self.pad_value, self.pad_mode, self.truncate_mode)
    }
}
