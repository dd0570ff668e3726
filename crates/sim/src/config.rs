//! Simulation configuration.
//!
//! All knobs are plain numbers, passed explicitly into
//! [`FluidSim::new`](crate::FluidSim::new) and owned by the instance -
//! there is no process-wide settings object. Validation happens once at
//! construction; a config that validates can never fail a tick.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest grid the solver accepts. Below this the stencils are all
/// border cells and the simulation is meaningless.
pub const MIN_RESOLUTION: usize = 16;

/// Largest grid the solver accepts (memory guard, 4 fields x 2 buffers).
pub const MAX_RESOLUTION: usize = 4096;

/// Fatal configuration errors, detected at allocation time.
///
/// There are no recoverable per-tick errors: a `FluidSim` that failed to
/// construct must not be used until rebuilt with a valid config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("resolution {0} outside supported range {MIN_RESOLUTION}..={MAX_RESOLUTION}")]
    InvalidResolution(usize),

    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f32 },
}

/// Numeric knobs for one simulation instance.
///
/// `resolution` is fixed for the lifetime of the instance; changing it
/// means constructing a new `FluidSim` (full reallocation + clear).
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Grid side length. All fields are `resolution x resolution`.
    pub resolution: usize,

    /// Fallback timestep in seconds, used when the caller passes a
    /// degenerate `dt` and by [`SimDriver`](crate::SimDriver) ticks.
    pub timestep: f32,

    /// Velocity self-diffusion coefficient (UV^2/s). Zero disables the
    /// diffusion stage entirely; higher means thicker, less mobile fluid.
    pub viscosity: f32,

    /// Jacobi passes per tick for velocity self-diffusion.
    pub diffusion_iterations: usize,

    /// Dye decay rate per second. Applied as `1 - dissipation * dt` after
    /// the transport sample.
    pub dissipation: f32,

    /// Jacobi iterations for the pressure solve. Quality knob: more
    /// iterations, lower residual divergence, linear cost. Zero skips
    /// the projection stages, leaving velocity purely advective.
    pub pressure_iterations: usize,

    /// Default splat radius in UV units.
    pub splat_radius: f32,

    /// Default splat hardness in [0,1].
    pub splat_hardness: f32,

    /// Default splat dye amount in [0,1].
    pub splat_amount: f32,

    /// Ceiling on injected force magnitude (UV/s). Splat forces above
    /// this are truncated, direction preserved.
    pub max_force: f32,

    /// Zero velocity and pressure at the grid border after projection
    /// (closed-container behavior).
    pub edge_no_slip: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            resolution: 256,
            timestep: 1.0 / 60.0,
            viscosity: 0.0,
            diffusion_iterations: 20,
            dissipation: 0.35,
            pressure_iterations: 40,
            splat_radius: 0.08,
            splat_hardness: 0.5,
            splat_amount: 0.8,
            max_force: 12.0,
            edge_no_slip: true,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolution < MIN_RESOLUTION || self.resolution > MAX_RESOLUTION {
            return Err(ConfigError::InvalidResolution(self.resolution));
        }
        for (name, value) in [
            ("timestep", self.timestep),
            ("splat_radius", self.splat_radius),
            ("max_force", self.max_force),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        for (name, value) in [
            ("viscosity", self.viscosity),
            ("dissipation", self.dissipation),
            ("splat_hardness", self.splat_hardness),
            ("splat_amount", self.splat_amount),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_resolution_is_fatal() {
        let config = SimConfig {
            resolution: 0,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidResolution(0))
        ));
    }

    #[test]
    fn non_finite_timestep_is_fatal() {
        let config = SimConfig {
            timestep: f32::NAN,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_dissipation_is_fatal() {
        let config = SimConfig {
            dissipation: -0.1,
            ..SimConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = SimConfig {
            resolution: 128,
            pressure_iterations: 25,
            ..SimConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.resolution, 128);
        assert_eq!(back.pressure_iterations, 25);
    }
}
