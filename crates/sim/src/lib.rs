//! Crema - 2D stable-fluids surface simulation
//!
//! Grid-based incompressible fluid solver with an advected dye field,
//! used to render a "milk poured into coffee" surface pattern:
//! - Double-buffered velocity / pressure / divergence / dye fields
//! - Localized splat injection (dye deposit + velocity impulse)
//! - Semi-Lagrangian advection (unconditionally stable backtrace)
//! - Jacobi pressure solve + projection for incompressibility
//!
//! This crate is framework-agnostic - it handles simulation only.
//! Rendering, input devices, and color mapping live outside the core and
//! talk to it through [`FluidSim`] and [`InjectionSource`].
//!
//! # Example
//!
//! ```
//! use sim::{FluidSim, SimConfig, Splat};
//! use glam::Vec2;
//!
//! let mut sim = FluidSim::new(SimConfig {
//!     resolution: 64,
//!     ..SimConfig::default()
//! })
//! .unwrap();
//!
//! sim.inject(&Splat {
//!     position: Vec2::splat(0.5),
//!     radius: 0.1,
//!     hardness: 0.8,
//!     amount: 1.0,
//!     force: Vec2::new(0.0, 2.0),
//! });
//! sim.step(1.0 / 60.0);
//!
//! let dye = sim.dye();
//! assert!(dye.get(32, 32).x > 0.0);
//! ```

pub mod advection;
pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod field;
pub mod pressure;
pub mod project;
pub mod solver;
pub mod source;
pub mod splat;

pub use config::{ConfigError, SimConfig};
pub use field::{CellValue, Field, FieldPair};
pub use glam::{Vec2, Vec4};
pub use solver::FluidSim;
pub use source::{InjectionSource, ScriptedSource, SimDriver};
pub use splat::Splat;
