//! System tests for the full tick pipeline.
//!
//! These verify the observable properties the display layer depends on:
//! - P1: Dye stays within [0,1] for any valid splat sequence
//! - P2: Splats touch nothing beyond their radius
//! - P3: With no input, dye decays monotonically to exactly zero
//! - P4: Clear is idempotent - no spontaneous generation
//! - P5: Arbitrarily large timesteps stay finite

use sim::diagnostics::{dye_stats, max_velocity, total_divergence, total_dye};
use sim::{FluidSim, ScriptedSource, SimConfig, SimDriver, Splat, Vec2, Vec4};

fn quiet_config(resolution: usize) -> SimConfig {
    // No projection, no diffusion, no decay: isolates injection+advection.
    SimConfig {
        resolution,
        viscosity: 0.0,
        dissipation: 0.0,
        pressure_iterations: 0,
        ..SimConfig::default()
    }
}

/// The reference scenario: 64x64, centered soft splat, one tick with
/// projection and viscosity disabled.
#[test]
fn centered_splat_scenario() {
    let mut sim = FluidSim::new(quiet_config(64)).unwrap();
    let center = Vec2::splat(0.5);
    sim.inject(&Splat {
        position: center,
        radius: 0.1,
        hardness: 0.8,
        amount: 1.0,
        force: Vec2::ZERO,
    });
    sim.step(1.0 / 60.0);

    let dye = sim.dye();
    // The four center cells sit well inside the hard core of the falloff.
    for (i, j) in [(31, 31), (32, 31), (31, 32), (32, 32)] {
        assert!(
            (dye.get(i, j).x - 1.0).abs() < 1e-5,
            "center cell ({i},{j}) = {}",
            dye.get(i, j).x
        );
    }
    // Nothing beyond the radius.
    for j in 0..64 {
        for i in 0..64 {
            let distance = dye.cell_uv(i, j).distance(center);
            if distance > 0.1 + 1e-5 {
                assert_eq!(dye.get(i, j), Vec4::ZERO, "cell ({i},{j}) at d={distance}");
            }
        }
    }
    // K = 0 skips projection: pressure and divergence never touched.
    assert!(sim.pressure().data().iter().all(|p| *p == 0.0));
    assert!(sim.divergence().data().iter().all(|d| *d == 0.0));
    // Zero force: velocity stayed purely advective and zero.
    assert_eq!(max_velocity(sim.velocity()), 0.0);
}

#[test]
fn splat_affects_no_cell_beyond_radius() {
    let mut sim = FluidSim::new(quiet_config(64)).unwrap();
    let position = Vec2::new(0.3, 0.6);
    sim.inject(&Splat {
        position,
        radius: 0.15,
        hardness: 0.2,
        amount: 0.9,
        force: Vec2::new(2.0, -1.0),
    });

    let dye = sim.dye();
    let velocity = sim.velocity();
    for j in 0..64 {
        for i in 0..64 {
            if dye.cell_uv(i, j).distance(position) > 0.15 + 1e-5 {
                assert_eq!(dye.get(i, j), Vec4::ZERO);
                assert_eq!(velocity.get(i, j), Vec2::ZERO);
            }
        }
    }
}

#[test]
fn dye_stays_in_unit_range_under_splat_pressure() {
    let mut sim = FluidSim::new(SimConfig {
        resolution: 64,
        dissipation: 0.2,
        ..SimConfig::default()
    })
    .unwrap();

    // Deterministic barrage: overlapping splats, over-range amounts and
    // forces that exceed the ceiling. Sanitization clamps them all.
    for frame in 0..120u32 {
        let t = frame as f32 / 120.0;
        sim.inject(&Splat {
            position: Vec2::new(0.3 + 0.4 * t, 0.5),
            radius: 0.2,
            hardness: 0.9,
            amount: 2.0,
            force: Vec2::new(40.0 * (1.0 - t), 40.0 * t),
        });
        sim.step(1.0 / 60.0);
    }

    for cell in sim.dye().data() {
        assert!(cell.is_finite());
        for channel in [cell.x, cell.y, cell.z, cell.w] {
            assert!((0.0..=1.0).contains(&channel), "channel {channel}");
        }
    }
}

#[test]
fn dye_decays_monotonically_to_exact_zero() {
    let mut sim = FluidSim::new(SimConfig {
        dissipation: 2.0,
        ..quiet_config(48)
    })
    .unwrap();
    sim.inject(&Splat {
        position: Vec2::splat(0.5),
        radius: 0.2,
        hardness: 0.5,
        amount: 1.0,
        force: Vec2::ZERO,
    });

    let mut previous = dye_stats(sim.dye()).max;
    assert!(previous > 0.9);
    for _ in 0..50 {
        sim.step(1.0 / 60.0);
        let current = dye_stats(sim.dye()).max;
        assert!(current <= previous, "dye grew: {previous} -> {current}");
        previous = current;
    }

    for _ in 0..400 {
        sim.step(1.0 / 60.0);
    }
    // The epsilon floor snaps the asymptote to exactly zero.
    assert_eq!(total_dye(sim.dye()), 0.0);
}

#[test]
fn clear_then_step_stays_all_zero() {
    let mut sim = FluidSim::new(SimConfig {
        resolution: 48,
        ..SimConfig::default()
    })
    .unwrap();
    sim.inject_at(Vec2::new(0.4, 0.4), Vec2::new(3.0, 1.0));
    sim.step(1.0 / 60.0);
    assert!(total_dye(sim.dye()) > 0.0);

    sim.clear();
    for _ in 0..10 {
        sim.step(1.0 / 60.0);
    }
    assert_eq!(total_dye(sim.dye()), 0.0);
    assert_eq!(max_velocity(sim.velocity()), 0.0);
}

#[test]
fn huge_timestep_produces_finite_fields() {
    let mut sim = FluidSim::new(SimConfig {
        resolution: 48,
        viscosity: 0.5,
        ..SimConfig::default()
    })
    .unwrap();
    sim.inject_at(Vec2::new(0.5, 0.3), Vec2::new(12.0, 0.0));
    sim.inject_at(Vec2::new(0.5, 0.7), Vec2::new(-12.0, 0.0));

    sim.step(1e6);

    for cell in sim.dye().data() {
        assert!(cell.is_finite());
        assert!(cell.max_element() <= 1.0 && cell.min_element() >= 0.0);
    }
    for v in sim.velocity().data() {
        assert!(v.is_finite());
    }
}

#[test]
fn forceful_injection_is_divergent_until_projected() {
    let mut sim = FluidSim::new(SimConfig {
        resolution: 64,
        ..SimConfig::default()
    })
    .unwrap();
    sim.inject_at(Vec2::splat(0.5), Vec2::new(6.0, 0.0));
    assert!(total_divergence(sim.velocity()) > 0.0);

    // Default config projects every tick; the field keeps moving without
    // blowing up.
    for _ in 0..30 {
        sim.step(1.0 / 60.0);
    }
    assert!(max_velocity(sim.velocity()).is_finite());
}

#[test]
fn degenerate_dt_falls_back_to_configured_timestep() {
    let mut sim = FluidSim::new(SimConfig {
        dissipation: 2.0,
        ..quiet_config(48)
    })
    .unwrap();
    sim.inject_at(Vec2::splat(0.5), Vec2::ZERO);
    let before = dye_stats(sim.dye()).max;

    sim.step(f32::NAN);
    let after = dye_stats(sim.dye()).max;
    // One configured-timestep tick of decay, not a NaN-poisoned field.
    assert!(after < before);
    assert!(after > 0.0);
}

#[test]
fn invalid_resolution_fails_at_construction() {
    let config = SimConfig {
        resolution: 0,
        ..SimConfig::default()
    };
    assert!(FluidSim::new(config).is_err());
}

#[test]
fn driver_drains_splats_and_honors_reset() {
    let sim = FluidSim::new(quiet_config(48)).unwrap();
    let pour = Splat {
        position: Vec2::new(0.5, 0.35),
        radius: 0.12,
        hardness: 0.6,
        amount: 1.0,
        force: Vec2::new(0.0, 1.5),
    };
    let source = ScriptedSource::new()
        .at(0, pour)
        .at(1, pour)
        .at(2, pour)
        .reset_at(5);
    let mut driver = SimDriver::new(sim, source);

    driver.run(4);
    assert!(total_dye(driver.sim.dye()) > 0.0);

    // Frame 5 resets before stepping; nothing re-seeds afterwards.
    driver.run(4);
    assert_eq!(total_dye(driver.sim.dye()), 0.0);
    assert_eq!(max_velocity(driver.sim.velocity()), 0.0);
}
