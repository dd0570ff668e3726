//! Shared numeric constants for the solver.
//!
//! All modules use these instead of defining their own floors. This keeps
//! the epsilon handling consistent between the injector, the advector and
//! the pressure solve.

use glam::Vec4;

/// Smallest splat radius accepted by the injector (UV units).
///
/// Radii at or below zero would collapse the falloff band to a point and
/// divide by zero inside the kernel; anything smaller than this is floored.
pub const MIN_SPLAT_RADIUS: f32 = 5e-4;

/// Dye values with magnitude below this are zeroed after dissipation.
///
/// Dissipation alone only approaches zero asymptotically; the floor lets
/// decayed cells settle at exactly zero instead of accumulating speckle.
pub const DYE_EPSILON: f32 = 1e-4;

/// Pressure values with magnitude below this are zeroed after the solve.
pub const PRESSURE_EPSILON: f32 = 1e-6;

/// Full dye deposit (opaque white). Injection blends cells toward this.
pub const DYE_FULL: Vec4 = Vec4::ONE;
