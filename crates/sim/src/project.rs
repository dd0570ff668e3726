//! Projection: subtract the pressure gradient from velocity.
//!
//! After the pressure solve, `v - grad(p)` has near-zero discrete
//! divergence (bounded by the solver iteration count). This is the core
//! "fluid" behavior: injected momentum redistributes through the field
//! instead of piling up locally.

use glam::Vec2;
use rayon::prelude::*;

use crate::field::{CellValue, Field};

/// `v' = v - grad(p)`, central differences with the same edge clamp as
/// the divergence and Jacobi stencils.
pub fn subtract_gradient(dst: &mut Field<Vec2>, velocity: &Field<Vec2>, pressure: &Field<f32>) {
    let n = dst.resolution();

    dst.data_mut()
        .par_chunks_mut(n)
        .enumerate()
        .for_each(|(j, row)| {
            let jj = j as i32;
            for (i, cell) in row.iter_mut().enumerate() {
                let ii = i as i32;
                let gradient = Vec2::new(
                    (pressure.clamped(ii + 1, jj) - pressure.clamped(ii - 1, jj)) * 0.5,
                    (pressure.clamped(ii, jj + 1) - pressure.clamped(ii, jj - 1)) * 0.5,
                );
                *cell = velocity.data()[j * n + i] - gradient;
            }
        });
}

/// Zero the one-cell border of a field, in place.
///
/// Border cells are written from their own value only (no cross-cell
/// reads), so the pass needs no double buffer.
pub fn zero_border<T: CellValue>(field: &mut Field<T>) {
    let n = field.resolution();
    for i in 0..n {
        field.set(i, 0, T::default());
        field.set(i, n - 1, T::default());
    }
    for j in 0..n {
        field.set(0, j, T::default());
        field.set(n - 1, j, T::default());
    }
}
