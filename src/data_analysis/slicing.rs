// src/data_analysis/slicing.rs

use ndarray::{Array2, Array3, ArrayView2, ArrayView3, Axis};
use ndarray_stats::QuantileExt;

use crate::axis_names::resolve_slice_axis;
use crate::error::{PlotError, Result};

/// Extract the 2D cross-section of `cube` at `slice_index` along `slice_axis`.
///
/// The remaining two axes keep their array order, so the result is
/// `(rows, cols) = (first remaining, second remaining)`. Unless `rotate` is set
/// the cross-section is transposed, which puts the first remaining axis on the
/// horizontal when drawn with the origin at the lower left.
pub fn take_slice(
    cube: ArrayView3<'_, f32>,
    slice_axis: i32,
    slice_index: usize,
    rotate: bool,
) -> Result<Array2<f32>> {
    let axis = resolve_slice_axis(slice_axis)?;
    let len = cube.len_of(Axis(axis));
    if slice_index >= len {
        return Err(PlotError::SliceIndexOutOfRange {
            index: slice_index,
            len,
            axis,
        });
    }

    let slc = cube.index_axis(Axis(axis), slice_index);
    Ok(if rotate {
        slc.to_owned()
    } else {
        slc.reversed_axes().to_owned()
    })
}

/// Finite (min, max) of a slice, skipping NaN and infinities.
/// Returns `None` when there is no finite value.
pub fn finite_range(data: ArrayView2<'_, f32>) -> Option<(f64, f64)> {
    let min = *data.min_skipnan() as f64;
    let max = *data.max_skipnan() as f64;
    if min.is_finite() && max.is_finite() {
        return Some((min, max));
    }

    // Infinities survive min_skipnan; fall back to a finite-only scan
    data.iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, &v| {
            let v = v as f64;
            Some(match acc {
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
                None => (v, v),
            })
        })
}

/// Element-wise `a - b` of two equally shaped cubes.
pub fn difference(a: ArrayView3<'_, f32>, b: ArrayView3<'_, f32>) -> Result<Array3<f32>> {
    if a.shape() != b.shape() {
        return Err(PlotError::ShapeMismatch {
            left: a.shape().to_vec(),
            right: b.shape().to_vec(),
        });
    }
    Ok(&a - &b)
}

/// Symmetric colour range `(-m, m)` where `m` is the largest absolute value.
pub fn symmetric_range(data: ArrayView3<'_, f32>) -> (f64, f64) {
    let m = *data.mapv(f32::abs).max_skipnan() as f64;
    let m = if m.is_finite() { m } else { 0.0 };
    (-m, m)
}
