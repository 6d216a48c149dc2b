//! Sliding window assembly.

use ndarray::{Array2, ArrayView2, Axis};

/// `window_nb` rows, each `sliding_window * dims` wide.
pub type WindowTensor = Array2<f32>;

/// Cuts overlapping stride-1 windows out of a `(rows, dims)` matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidingWindowUnit {
    window: usize,
}

impl SlidingWindowUnit {
    /// Creates a window unit. `window` is clamped to at least 1.
    pub fn new(window: usize) -> Self {
        Self { window: window.max(1) }
    }

    /// Window width in rows.
    #[inline]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of windows produced from `rows` rows.
    #[inline]
    pub fn window_count(&self, rows: usize) -> usize {
        (rows + 1).saturating_sub(self.window)
    }

    /// Window `i` is rows `[i, i + window)` flattened row-major.
    pub fn transform(&self, rows: ArrayView2<'_, f32>) -> WindowTensor {
        let (n_rows, dims) = rows.dim();
        let mut windows = Array2::zeros((self.window_count(n_rows), self.window * dims));
        if windows.is_empty() {
            return windows;
        }

        for (mut out, window) in windows
            .outer_iter_mut()
            .zip(rows.axis_windows(Axis(0), self.window))
        {
            out.iter_mut().zip(window.iter()).for_each(|(o, v)| *o = *v);
        }

        windows
    }
}
