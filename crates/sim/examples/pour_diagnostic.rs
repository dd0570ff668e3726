//! Deterministic "milk pour" scenario with ASCII output.
//!
//! Pours dye at the top of the cup for two seconds, flicks it sideways,
//! then lets it swirl and decay. Prints a density map plus field stats
//! every second so behavior can be eyeballed (and diffed) over time.
//!
//! Run with: cargo run --release --example pour_diagnostic -p crema-sim
//! An optional argument points at a JSON `SimConfig` to override the
//! built-in one: cargo run --example pour_diagnostic -- config.json

use sim::diagnostics::{dye_intensity, dye_stats, max_velocity, total_divergence};
use sim::{FluidSim, ScriptedSource, SimConfig, SimDriver, Splat, Vec2};

const MAP_COLS: usize = 48;
const MAP_ROWS: usize = 24;
const SHADES: &[u8] = b" .:-=+*#%@";

fn ascii_map(sim: &FluidSim) -> String {
    let dye = sim.dye();
    let mut out = String::with_capacity((MAP_COLS + 1) * MAP_ROWS);
    for row in 0..MAP_ROWS {
        for col in 0..MAP_COLS {
            let uv = Vec2::new(
                (col as f32 + 0.5) / MAP_COLS as f32,
                (row as f32 + 0.5) / MAP_ROWS as f32,
            );
            let value = dye_intensity(dye.sample_uv(uv)).clamp(0.0, 1.0);
            let shade = (value * (SHADES.len() - 1) as f32).round() as usize;
            out.push(SHADES[shade] as char);
        }
        out.push('\n');
    }
    out
}

fn pour_script() -> ScriptedSource {
    let mut source = ScriptedSource::new();
    // Two seconds of steady pour at the top of the cup.
    for frame in 0..120u64 {
        source = source.at(
            frame,
            Splat {
                position: Vec2::new(0.5, 0.2),
                radius: 0.05,
                hardness: 0.7,
                amount: 0.9,
                force: Vec2::new(0.0, 2.5),
            },
        );
    }
    // A sideways flick to start the swirl.
    source.at(
        150,
        Splat {
            position: Vec2::new(0.5, 0.5),
            radius: 0.12,
            hardness: 0.3,
            amount: 0.0,
            force: Vec2::new(6.0, 0.0),
        },
    )
}

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading config from {path}");
            let text = std::fs::read_to_string(&path).expect("config file readable");
            serde_json::from_str(&text).expect("config file is valid SimConfig JSON")
        }
        None => SimConfig {
            resolution: 96,
            viscosity: 1e-5,
            dissipation: 0.15,
            ..SimConfig::default()
        },
    };

    let sim = FluidSim::new(config).expect("valid config");
    let mut driver = SimDriver::new(sim, pour_script());

    const SECONDS: usize = 6;
    const FPS: usize = 60;
    for second in 0..SECONDS {
        driver.run(FPS);
        let sim = &driver.sim;
        let stats = dye_stats(sim.dye());
        println!("t={}s", second + 1);
        print!("{}", ascii_map(sim));
        println!(
            "  dye avg={:.4} max={:.4} | max vel={:.3} UV/s | |div|={:.4}",
            stats.avg,
            stats.max,
            max_velocity(sim.velocity()),
            total_divergence(sim.velocity())
        );
        println!();
    }
}
