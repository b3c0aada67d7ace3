//! Roberts cross gradient
//!
//! The edge value of a pixel compares it with its right, lower and
//! lower-right neighbors:
//!
//! ```text
//! gx = mid - lower_right
//! gy = right - down
//! edge = sqrt(gx^2 + gy^2)
//! ```
//!
//! Neighbors past the last row or column clamp to that row or column, so
//! the gradient component along a clamped axis is zero and the bottom-right
//! corner is always zero. The magnitude is computed in `f64` and narrowed
//! back to the raster's sample type.

use crate::{FilterError, FilterResult};
use rastedge_core::{DataAccessor, Sample};

/// Clamped neighbor indices of one pixel.
///
/// `prev_row` and `prev_col` are part of the neighborhood but do not enter
/// the Roberts gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighborhood {
    pub prev_row: u32,
    pub prev_col: u32,
    pub next_row: u32,
    pub next_col: u32,
}

impl Neighborhood {
    /// Neighbors of (row, col) in a `rows x cols` raster, clamped to the
    /// raster edges.
    #[inline]
    pub fn clamped(row: u32, col: u32, rows: u32, cols: u32) -> Self {
        Self {
            prev_row: row.saturating_sub(1),
            prev_col: col.saturating_sub(1),
            next_row: row.saturating_add(1).min(rows.saturating_sub(1)),
            next_col: col.saturating_add(1).min(cols.saturating_sub(1)),
        }
    }
}

#[inline]
fn sample_at<T: Sample>(src: &mut DataAccessor<'_, T>, row: u32, column: u32) -> FilterResult<f64> {
    src.to_pixel(row, column);
    src.value()
        .map(T::to_f64)
        .map_err(|_| FilterError::AccessFailure { row, column })
}

/// Compute the edge value of the pixel at (row, col).
///
/// The cursor is re-seeked for each of the four reads, in the order right,
/// down, lower-right, center.
///
/// # Errors
///
/// Returns [`FilterError::AccessFailure`] if the cursor is invalid at any
/// of the four positions.
pub fn edge_value<T: Sample>(
    src: &mut DataAccessor<'_, T>,
    row: u32,
    col: u32,
    rows: u32,
    cols: u32,
) -> FilterResult<T> {
    let n = Neighborhood::clamped(row, col, rows, cols);

    let right = sample_at(src, row, n.next_col)?;
    let down = sample_at(src, n.next_row, col)?;
    let lower_right = sample_at(src, n.next_row, n.next_col)?;
    let mid = sample_at(src, row, col)?;

    let gx = mid - lower_right;
    let gy = right - down;
    Ok(T::from_f64((gx * gx + gy * gy).sqrt()))
}
