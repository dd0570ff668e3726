//! Step orchestrator: owns the field pool and sequences one tick.
//!
//! A tick is a fixed pipeline - diffusion, divergence, pressure solve,
//! projection, velocity self-advection, border pass, dye advection - with
//! a full barrier between passes: every pass reads the snapshot the
//! previous pass produced, never a buffer still being written. The
//! orchestrator is the only code that calls [`FieldPair::swap`].
//!
//! One producer mutates a given instance serially; `inject` and `step`
//! are not designed for concurrent callers (parallelism lives inside a
//! pass, not across passes).

use glam::{Vec2, Vec4};

use crate::advection::advect;
use crate::config::{ConfigError, SimConfig};
use crate::constants::{DYE_EPSILON, PRESSURE_EPSILON};
use crate::field::{Field, FieldPair};
use crate::pressure::{compute_divergence, diffuse_velocity, jacobi_pressure, zero_small};
use crate::project::{subtract_gradient, zero_border};
use crate::splat::{apply_splat, Splat};

/// 2D stable-fluids simulation instance.
///
/// Fields are allocated once at construction (validated), cleared to
/// zero, and mutated every tick; [`FluidSim::clear`] resets them without
/// reallocating. A resolution change means constructing a new instance.
pub struct FluidSim {
    config: SimConfig,
    velocity: FieldPair<Vec2>,
    pressure: FieldPair<f32>,
    divergence: FieldPair<f32>,
    dye: FieldPair<Vec4>,
}

impl FluidSim {
    /// Allocate all field pairs for the configured resolution.
    ///
    /// The only failure point of the whole simulation: a config that
    /// validates here can never fail a tick.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let n = config.resolution;
        log::info!("allocating {n}x{n} fluid fields");
        Ok(Self {
            config,
            velocity: FieldPair::new(n),
            pressure: FieldPair::new(n),
            divergence: FieldPair::new(n),
            dye: FieldPair::new(n),
        })
    }

    #[inline]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[inline]
    pub fn resolution(&self) -> usize {
        self.config.resolution
    }

    /// Deposit dye and momentum at a localized spot.
    ///
    /// The splat is sanitized (radius floored, scalars clamped, force
    /// truncated to the configured ceiling) and consumed immediately.
    /// Never fails; a position entirely off-grid touches nothing.
    pub fn inject(&mut self, splat: &Splat) {
        let splat = splat.sanitized(self.config.max_force);
        apply_splat(&mut self.dye, &mut self.velocity, &splat);
        self.dye.swap();
        self.velocity.swap();
    }

    /// Inject with the configured default radius/hardness/amount.
    pub fn inject_at(&mut self, position: Vec2, force: Vec2) {
        self.inject(&Splat {
            position,
            radius: self.config.splat_radius,
            hardness: self.config.splat_hardness,
            amount: self.config.splat_amount,
            force,
        });
    }

    /// Advance the simulation by one tick.
    ///
    /// A degenerate `dt` (non-finite or non-positive) falls back to the
    /// configured timestep; per-tick operations themselves cannot fail.
    pub fn step(&mut self, dt: f32) {
        let dt = if dt.is_finite() && dt > 0.0 {
            dt
        } else {
            self.config.timestep
        };

        // 1. Velocity self-diffusion (optional).
        if self.config.viscosity > 0.0 {
            for _ in 0..self.config.diffusion_iterations {
                let (src, dst) = self.velocity.split();
                diffuse_velocity(dst, src, self.config.viscosity, dt);
                self.velocity.swap();
            }
        }

        // 2-4. Divergence, pressure solve, projection. Zero iterations
        // skips all three, leaving the velocity purely advective.
        if self.config.pressure_iterations > 0 {
            {
                let (_, dst) = self.divergence.split();
                compute_divergence(dst, self.velocity.read());
            }
            self.divergence.swap();

            self.pressure.clear();
            for _ in 0..self.config.pressure_iterations {
                let (src, dst) = self.pressure.split();
                jacobi_pressure(dst, src, self.divergence.read());
                self.pressure.swap();
            }
            zero_small(self.pressure.read_mut(), PRESSURE_EPSILON);

            {
                let (src, dst) = self.velocity.split();
                subtract_gradient(dst, src, self.pressure.read());
            }
            self.velocity.swap();
        }

        // 5. Velocity self-advection (no dissipation, no floor).
        {
            let (src, dst) = self.velocity.split();
            advect(dst, src, src, dt, 0.0, 0.0);
        }
        self.velocity.swap();

        // 6. Border pass (optional): closed container, nothing flows
        // through the rim.
        if self.config.edge_no_slip {
            zero_border(self.velocity.read_mut());
            zero_border(self.pressure.read_mut());
        }

        // 7. Dye advection with dissipation and the speckle floor.
        {
            let (src, dst) = self.dye.split();
            advect(
                dst,
                src,
                self.velocity.read(),
                dt,
                self.config.dissipation,
                DYE_EPSILON,
            );
        }
        self.dye.swap();
    }

    /// Reset all fields to zero without reallocating.
    pub fn clear(&mut self) {
        log::debug!("clearing all fields");
        self.velocity.clear();
        self.pressure.clear();
        self.divergence.clear();
        self.dye.clear();
    }

    /// Current dye field, for display by the presentation layer.
    ///
    /// The handle is transient: the next `step` or `inject` call may swap
    /// buffer identity, so consumers must not hold it across calls.
    #[inline]
    pub fn dye(&self) -> &Field<Vec4> {
        self.dye.read()
    }

    /// Current velocity field (diagnostics).
    #[inline]
    pub fn velocity(&self) -> &Field<Vec2> {
        self.velocity.read()
    }

    /// Current pressure field (diagnostics).
    #[inline]
    pub fn pressure(&self) -> &Field<f32> {
        self.pressure.read()
    }

    /// Current divergence field (diagnostics).
    #[inline]
    pub fn divergence(&self) -> &Field<f32> {
        self.divergence.read()
    }
}
