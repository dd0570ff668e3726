//! Quick benchmark for profiling the fluid solver.
//!
//! Run with: cargo run --release --example bench -p crema-sim
//! Profile with: cargo flamegraph --example bench -p crema-sim

use sim::diagnostics::{dye_stats, max_velocity, total_divergence};
use sim::{FluidSim, SimConfig, Vec2};
use std::time::Instant;

fn main() {
    const RESOLUTION: usize = 256;
    const FRAMES: usize = 300; // 5 seconds at 60 FPS
    const DT: f32 = 1.0 / 60.0;

    let config = SimConfig {
        resolution: RESOLUTION,
        viscosity: 2e-5,
        ..SimConfig::default()
    };
    println!(
        "Setting up {RESOLUTION}x{RESOLUTION} simulation, {} pressure iterations",
        config.pressure_iterations
    );
    let mut sim = FluidSim::new(config).expect("config is valid");

    // Warm up with a few pours so the timed region runs on a busy field.
    println!("Warming up (60 frames)...");
    for frame in 0..60 {
        let t = frame as f32 / 60.0;
        sim.inject_at(Vec2::new(0.5, 0.25), Vec2::new(2.0 * (t * 12.0).sin(), 3.0));
        sim.step(DT);
    }

    println!("Running {FRAMES} frames...");
    let start = Instant::now();
    for frame in 0..FRAMES {
        // Keep injecting like an interactive session does.
        if frame % 2 == 0 {
            let t = frame as f32 / FRAMES as f32;
            sim.inject_at(Vec2::new(0.3 + 0.4 * t, 0.25), Vec2::new(0.0, 3.5));
        }
        sim.step(DT);
    }
    let elapsed = start.elapsed();

    let per_frame = elapsed.as_secs_f64() * 1000.0 / FRAMES as f64;
    println!("Total: {:.2?} ({per_frame:.3} ms/frame)", elapsed);
    println!(
        "Throughput: {:.1} Mcells/s",
        (RESOLUTION * RESOLUTION * FRAMES) as f64 / elapsed.as_secs_f64() / 1e6
    );

    let stats = dye_stats(sim.dye());
    println!(
        "Final dye avg={:.4} max={:.4}, max velocity={:.3} UV/s, |div|={:.4}",
        stats.avg,
        stats.max,
        max_velocity(sim.velocity()),
        total_divergence(sim.velocity())
    );
}
