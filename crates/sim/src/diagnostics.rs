//! Field statistics for tests, benchmarks and console diagnostics.
//!
//! Read-only measurements; nothing here mutates simulation state.

use glam::{Vec2, Vec4};

use crate::field::Field;

/// Sum of absolute discrete divergence across all cells.
///
/// The projection property: this strictly drops after a pressure solve +
/// gradient subtraction, and approaches zero as iterations increase.
pub fn total_divergence(velocity: &Field<Vec2>) -> f32 {
    let n = velocity.resolution();
    let mut total = 0.0f32;
    for j in 0..n {
        for i in 0..n {
            let (i, j) = (i as i32, j as i32);
            let right = velocity.clamped(i + 1, j).x;
            let left = velocity.clamped(i - 1, j).x;
            let up = velocity.clamped(i, j + 1).y;
            let down = velocity.clamped(i, j - 1).y;
            total += ((right - left + up - down) * 0.5).abs();
        }
    }
    total
}

/// Largest velocity magnitude in the field (UV/s).
pub fn max_velocity(velocity: &Field<Vec2>) -> f32 {
    velocity
        .data()
        .iter()
        .map(|v| v.length())
        .fold(0.0f32, f32::max)
}

/// Per-cell dye intensity: the strongest channel.
#[inline]
pub fn dye_intensity(cell: Vec4) -> f32 {
    cell.max_element()
}

/// Total dye mass (sum of per-cell intensity).
pub fn total_dye(dye: &Field<Vec4>) -> f32 {
    dye.data().iter().map(|c| dye_intensity(*c)).sum()
}

/// Min / max / average dye intensity.
#[derive(Clone, Copy, Debug, Default)]
pub struct DyeStats {
    pub min: f32,
    pub max: f32,
    pub avg: f32,
}

pub fn dye_stats(dye: &Field<Vec4>) -> DyeStats {
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    let mut sum = 0.0;
    for cell in dye.data() {
        let value = dye_intensity(*cell);
        min = min.min(value);
        max = max.max(value);
        sum += value;
    }
    let count = dye.data().len();
    if count == 0 {
        DyeStats::default()
    } else {
        DyeStats {
            min,
            max,
            avg: sum / count as f32,
        }
    }
}

/// Curl of the velocity field: `dv/dx - du/dy`, central differences.
///
/// Measurement only - the pipeline applies no confinement force. Useful
/// for watching swirl develop after an off-center pour.
pub fn compute_vorticity(dst: &mut Field<f32>, velocity: &Field<Vec2>) {
    let n = dst.resolution();
    for j in 0..n {
        for i in 0..n {
            let (ii, jj) = (i as i32, j as i32);
            let dv_dx = (velocity.clamped(ii + 1, jj).y - velocity.clamped(ii - 1, jj).y) * 0.5;
            let du_dy = (velocity.clamped(ii, jj + 1).x - velocity.clamped(ii, jj - 1).x) * 0.5;
            dst.set(i, j, dv_dx - du_dy);
        }
    }
}
