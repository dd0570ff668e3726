//! Injection sources and the tick driver.
//!
//! Every input device - mouse, hand tracking, a scripted scenario - boils
//! down to the same thing: zero or more splats per tick, plus an
//! occasional reset request. [`InjectionSource`] is that seam; device
//! adapters live outside the core and only this trait crosses the
//! boundary. [`ScriptedSource`] is the deterministic adapter used by
//! tests and the example binaries.

use std::collections::VecDeque;

use crate::solver::FluidSim;
use crate::splat::Splat;

/// Per-tick supplier of injection events.
pub trait InjectionSource {
    /// Next pending splat for the current tick, or `None` when drained.
    fn poll(&mut self) -> Option<Splat>;

    /// True if the user asked for a field reset this tick (drain-on-read).
    fn reset_requested(&mut self) -> bool {
        false
    }

    /// Called by the driver after the tick has stepped.
    fn end_tick(&mut self) {}
}

/// A queue of splats is already a source: interactive glue pushes, the
/// driver drains.
impl InjectionSource for VecDeque<Splat> {
    fn poll(&mut self) -> Option<Splat> {
        self.pop_front()
    }
}

/// Deterministic, frame-indexed splat schedule.
///
/// Scenarios are deliberately RNG-free so tests and demos can lock
/// behavior over time.
#[derive(Default)]
pub struct ScriptedSource {
    events: Vec<(u64, Splat)>,
    resets: Vec<u64>,
    frame: u64,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a splat for the given frame. Events must be added in
    /// frame order; same-frame events all fire on that tick.
    pub fn at(mut self, frame: u64, splat: Splat) -> Self {
        debug_assert!(self.events.last().is_none_or(|(f, _)| *f <= frame));
        self.events.push((frame, splat));
        self
    }

    /// Schedule a field reset for the given frame.
    pub fn reset_at(mut self, frame: u64) -> Self {
        self.resets.push(frame);
        self
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl InjectionSource for ScriptedSource {
    fn poll(&mut self) -> Option<Splat> {
        match self.events.get(self.cursor) {
            Some((frame, splat)) if *frame == self.frame => {
                self.cursor += 1;
                Some(*splat)
            }
            _ => None,
        }
    }

    fn reset_requested(&mut self) -> bool {
        self.resets.contains(&self.frame)
    }

    fn end_tick(&mut self) {
        // Skip any events the schedule left behind on earlier frames.
        while self
            .events
            .get(self.cursor)
            .is_some_and(|(f, _)| *f <= self.frame)
        {
            self.cursor += 1;
        }
        self.frame += 1;
    }
}

/// Glue between a source and a simulation: one `tick` call per external
/// frame drains resets and splats, then steps with the configured
/// timestep.
pub struct SimDriver<S: InjectionSource> {
    pub sim: FluidSim,
    source: S,
}

impl<S: InjectionSource> SimDriver<S> {
    pub fn new(sim: FluidSim, source: S) -> Self {
        Self { sim, source }
    }

    /// Run one tick with the configured timestep.
    pub fn tick(&mut self) {
        self.tick_with(self.sim.config().timestep);
    }

    /// Run one tick with a measured frame delta.
    pub fn tick_with(&mut self, dt: f32) {
        if self.source.reset_requested() {
            self.sim.clear();
        }
        while let Some(splat) = self.source.poll() {
            self.sim.inject(&splat);
        }
        self.sim.step(dt);
        self.source.end_tick();
    }

    /// Run `ticks` consecutive ticks with the configured timestep.
    pub fn run(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Tear down, handing back the simulation.
    pub fn into_sim(self) -> FluidSim {
        self.sim
    }
}
