//! Time × modulation-frequency grid for scalograms.
//!
//! Cells start out missing (`None`) and become `Some` the first time an
//! estimate lands in them, so a measured zero is distinguishable from a cell
//! no analysis window ever reached.

use crate::segment::window_count;

/// Fixed time shift between successive scalogram windows, in seconds.
pub const SCALOGRAM_SHIFT: f64 = 0.1;

/// Row at which window `iwin` of a `window_len`-second window is stored, so
/// that the estimate is centred on its window.
#[inline]
pub fn centered_row(iwin: usize, window_len: f64, shift: f64) -> usize {
    iwin + (window_len / 2.0 / shift).round() as usize
}

/// Number of grid rows needed to hold every window of every modulation
/// frequency in `freqs`, for a series of `len` samples at `fs`.
///
/// Window length at frequency `f` is `window_nt / f` seconds. This is the
/// capacity pass: call it once, allocate, then fill.
pub fn scalogram_rows(
    len: usize,
    fs: f64,
    freqs: &[f64],
    window_nt: f64,
    shift: f64,
    zero_pad: bool,
) -> usize {
    freqs
        .iter()
        .map(|&f| {
            let window_len = window_nt / f;
            match window_count(len, fs, window_len, shift, zero_pad) {
                0 => 0,
                n => centered_row(n - 1, window_len, shift) + 1,
            }
        })
        .max()
        .unwrap_or(0)
}

/// Dense row-major grid of optional values.
#[derive(Debug, Clone, PartialEq)]
pub struct Scalogram {
    rows: usize,
    cols: usize,
    cells: Vec<Option<f64>>,
}

impl Scalogram {
    /// Create a grid with every cell missing.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Number of time rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of modulation-frequency columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value at `(row, col)`; `None` when missing or out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col]
        } else {
            None
        }
    }

    /// Overwrite `(row, col)`. Writes outside the grid are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = Some(value);
        }
    }

    /// Add `value` into `(row, col)`, turning a missing cell into `Some`.
    pub fn accumulate(&mut self, row: usize, col: usize, value: f64) {
        if row < self.rows && col < self.cols {
            let cell = &mut self.cells[row * self.cols + col];
            *cell = Some(cell.unwrap_or(0.0) + value);
        }
    }

    /// Cell-wise sum with another grid of the same shape.
    ///
    /// A cell stays missing only when it is missing in both grids.
    pub fn merge_sum(&mut self, other: &Scalogram) {
        debug_assert_eq!((self.rows, self.cols), (other.rows, other.cols));
        for (cell, add) in self.cells.iter_mut().zip(&other.cells) {
            if let Some(v) = add {
                *cell = Some(cell.unwrap_or(0.0) + v);
            }
        }
    }

    /// Column `col` as a time series.
    pub fn column(&self, col: usize) -> Vec<Option<f64>> {
        (0..self.rows).map(|r| self.get(r, col)).collect()
    }

    /// Row `row` across modulation frequencies.
    pub fn row(&self, row: usize) -> &[Option<f64>] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// Number of cells holding a value.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// `(row, col, value)` of the largest filled cell.
    pub fn peak(&self) -> Option<(usize, usize, f64)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|v| (i / self.cols, i % self.cols, v)))
            .max_by(|a, b| a.2.total_cmp(&b.2))
    }
}
