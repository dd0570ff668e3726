//! Semi-Lagrangian transport.
//!
//! Each cell backtraces along the velocity field and gathers the source
//! value at the traced position with a bilinear, edge-clamped sample.
//! The scheme is unconditionally stable for any `dt` or velocity
//! magnitude - out-of-grid traces clamp to the border - at the cost of
//! numerical diffusion proportional to speed and step count. That
//! softening is accepted behavior for this surface, not a defect.

use glam::Vec2;
use rayon::prelude::*;

use crate::field::{CellValue, Field};

/// Transport `src` along `velocity` into `dst`.
///
/// `velocity` is in UV/s; the backtrace converts it to grid cells using
/// the field resolution. `dissipation` applies a uniform post-sample
/// decay of `1 - dissipation * dt` (pass 0 for velocity self-advection).
/// Values whose magnitude falls below `floor` snap to zero; pass 0 to
/// disable the floor.
pub fn advect<T: CellValue>(
    dst: &mut Field<T>,
    src: &Field<T>,
    velocity: &Field<Vec2>,
    dt: f32,
    dissipation: f32,
    floor: f32,
) {
    let n = dst.resolution();
    let scale = dt * n as f32;
    let keep = (1.0 - dissipation * dt).max(0.0);

    dst.data_mut()
        .par_chunks_mut(n)
        .enumerate()
        .for_each(|(j, row)| {
            for (i, cell) in row.iter_mut().enumerate() {
                let vel = velocity.data()[j * n + i];
                let traced = Vec2::new(i as f32, j as f32) - vel * scale;
                let mut value = src.sample_grid(traced) * keep;
                if floor > 0.0 && value.magnitude() < floor {
                    value = T::default();
                }
                *cell = value;
            }
        });
}
