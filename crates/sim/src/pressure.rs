//! Divergence and Jacobi relaxation kernels.
//!
//! The pressure solve finds `p` approximately satisfying the discrete
//! Poisson equation `lap(p) = div(v)`, so the projector can subtract
//! `grad(p)` and leave the velocity field near divergence-free. Velocity
//! self-diffusion reuses the same relaxation machinery with a viscosity
//! weight.
//!
//! Every kernel here is a pure per-cell map from a read field to a write
//! field; neighbor lookups outside the grid clamp to the edge cell
//! (zero-gradient boundary), so edges never act as pressure sinks.

use glam::Vec2;
use rayon::prelude::*;

use crate::field::Field;

/// Discrete divergence of the velocity field, central differences:
/// `(right.x - left.x + up.y - down.y) / 2`.
pub fn compute_divergence(dst: &mut Field<f32>, velocity: &Field<Vec2>) {
    let n = dst.resolution();

    dst.data_mut()
        .par_chunks_mut(n)
        .enumerate()
        .for_each(|(j, row)| {
            let j = j as i32;
            for (i, cell) in row.iter_mut().enumerate() {
                let i = i as i32;
                let right = velocity.clamped(i + 1, j).x;
                let left = velocity.clamped(i - 1, j).x;
                let up = velocity.clamped(i, j + 1).y;
                let down = velocity.clamped(i, j - 1).y;
                *cell = (right - left + up - down) * 0.5;
            }
        });
}

/// One Jacobi iteration of the pressure Poisson equation:
/// `p' = (p_left + p_right + p_up + p_down - div) / 4`.
///
/// The solve runs this for a fixed iteration count with a buffer swap
/// after each pass. The count is a quality knob, not a correctness
/// requirement - the update is stable for any count, and zero iterations
/// simply leaves the velocity divergent.
pub fn jacobi_pressure(dst: &mut Field<f32>, src: &Field<f32>, divergence: &Field<f32>) {
    let n = dst.resolution();

    dst.data_mut()
        .par_chunks_mut(n)
        .enumerate()
        .for_each(|(j, row)| {
            let jj = j as i32;
            for (i, cell) in row.iter_mut().enumerate() {
                let ii = i as i32;
                let sum = src.clamped(ii - 1, jj)
                    + src.clamped(ii + 1, jj)
                    + src.clamped(ii, jj - 1)
                    + src.clamped(ii, jj + 1);
                *cell = (sum - divergence.data()[j * n + i]) * 0.25;
            }
        });
}

/// One Jacobi pass of velocity self-diffusion (implicit Stam form):
/// `v' = (v + a * (v_l + v_r + v_u + v_d)) / (1 + 4a)` with
/// `a = viscosity * dt * n^2`.
///
/// The implicit form is unconditionally stable, so large viscosity or dt
/// thickens the fluid instead of blowing it up.
pub fn diffuse_velocity(dst: &mut Field<Vec2>, src: &Field<Vec2>, viscosity: f32, dt: f32) {
    let n = dst.resolution();
    let a = viscosity * dt * (n * n) as f32;
    let inv = 1.0 / (1.0 + 4.0 * a);

    dst.data_mut()
        .par_chunks_mut(n)
        .enumerate()
        .for_each(|(j, row)| {
            let jj = j as i32;
            for (i, cell) in row.iter_mut().enumerate() {
                let ii = i as i32;
                let center = src.data()[j * n + i];
                let sum = src.clamped(ii - 1, jj)
                    + src.clamped(ii + 1, jj)
                    + src.clamped(ii, jj - 1)
                    + src.clamped(ii, jj + 1);
                *cell = (center + sum * a) * inv;
            }
        });
}

/// Zero values with magnitude under `floor`, in place.
///
/// Per-cell with no cross-cell reads, so it needs no double buffer.
pub fn zero_small(field: &mut Field<f32>, floor: f32) {
    field.data_mut().par_iter_mut().for_each(|value| {
        if value.abs() < floor {
            *value = 0.0;
        }
    });
}
