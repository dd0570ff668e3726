//! Splat injection: localized dye deposit plus velocity impulse.
//!
//! A splat is consumed immediately - sanitized, rasterized into the dye
//! and velocity write buffers in a single pass, then forgotten. Injection
//! never fails: degenerate parameters are silently corrected, and a UV
//! entirely outside the grid just shrinks the affected mask to nothing.

use glam::{Vec2, Vec4};
use rayon::prelude::*;

use crate::constants::{DYE_FULL, MIN_SPLAT_RADIUS};
use crate::field::FieldPair;

/// One localized deposit event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Splat {
    /// Center in UV space, `[0,1]^2` for on-grid splats.
    pub position: Vec2,
    /// Outer falloff radius in UV units.
    pub radius: f32,
    /// Falloff sharpness in [0,1]: 0 = soft gradient across the whole
    /// radius, 1 = hard-edged disk.
    pub hardness: f32,
    /// Dye deposit strength in [0,1].
    pub amount: f32,
    /// Velocity impulse (UV/s), applied additively under the mask.
    pub force: Vec2,
}

impl Splat {
    /// Clamp every parameter into its legal range.
    ///
    /// Real-time input favors silent correction over failure: non-finite
    /// components are replaced, the radius is floored, and the force is
    /// truncated to `max_force` with its direction preserved.
    pub fn sanitized(&self, max_force: f32) -> Splat {
        let position = if self.position.is_finite() {
            self.position
        } else {
            Vec2::splat(0.5)
        };
        let radius = if self.radius.is_finite() {
            self.radius.max(MIN_SPLAT_RADIUS)
        } else {
            MIN_SPLAT_RADIUS
        };
        let sane = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        let force = if self.force.is_finite() {
            self.force.clamp_length_max(max_force)
        } else {
            Vec2::ZERO
        };
        Splat {
            position,
            radius,
            hardness: sane(self.hardness),
            amount: sane(self.amount),
            force,
        }
    }
}

/// Radial mask: 1 at the center, smooth transition over
/// `[radius * (1 - hardness), radius]`, 0 outside.
///
/// The degenerate hardness = 1 case (zero-width transition) is handled by
/// the explicit branches, so the smoothstep denominator never hits zero.
#[inline]
fn falloff(distance: f32, radius: f32, hardness: f32) -> f32 {
    if distance >= radius {
        return 0.0;
    }
    let inner = radius * (1.0 - hardness);
    if distance <= inner {
        return 1.0;
    }
    let t = (distance - inner) / (radius - inner);
    1.0 - t * t * (3.0 - 2.0 * t)
}

/// Rasterize one sanitized splat into the dye and velocity write buffers.
///
/// Both outputs come from both inputs in one pass: dye blends toward the
/// full deposit by `mask * amount`, velocity gains `force * mask` as an
/// additive impulse so co-located splats accumulate momentum. Cells beyond
/// the radius are copied through untouched. The caller swaps both pairs.
pub fn apply_splat(dye: &mut FieldPair<Vec4>, velocity: &mut FieldPair<Vec2>, splat: &Splat) {
    let n = dye.resolution();
    let inv_n = 1.0 / n as f32;

    let (dye_src, dye_dst) = dye.split();
    let (vel_src, vel_dst) = velocity.split();

    dye_dst
        .data_mut()
        .par_chunks_mut(n)
        .zip(vel_dst.data_mut().par_chunks_mut(n))
        .enumerate()
        .for_each(|(j, (dye_row, vel_row))| {
            let v = (j as f32 + 0.5) * inv_n;
            for i in 0..n {
                let idx = j * n + i;
                let dye0 = dye_src.data()[idx];
                let vel0 = vel_src.data()[idx];

                let uv = Vec2::new((i as f32 + 0.5) * inv_n, v);
                let distance = uv.distance(splat.position);
                if distance >= splat.radius {
                    dye_row[i] = dye0;
                    vel_row[i] = vel0;
                    continue;
                }

                let mask = falloff(distance, splat.radius, splat.hardness);
                let blend = mask * splat.amount;
                dye_row[i] = (dye0 + (DYE_FULL - dye0) * blend).clamp(Vec4::ZERO, DYE_FULL);
                vel_row[i] = vel0 + splat.force * mask;
            }
        });
}
