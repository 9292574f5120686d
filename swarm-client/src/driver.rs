use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use swarm_core::{Simulation, SimulationExt};
use swarm_shared::{AgentSnapshot, FrameSnapshot};

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Ticks to advance.
    pub ticks: u64,
    /// Emit a frame whenever the tick count is a multiple of this.
    pub every: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct RunSummary {
    pub ticks: u64,
    pub frames: u64,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn ticks_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.ticks as f64 / secs
        } else {
            0.0
        }
    }
}

/// Current state of every agent.
pub fn snapshot(simulation: &dyn Simulation) -> FrameSnapshot {
    FrameSnapshot {
        tick: simulation.ticks(),
        agents: simulation
            .views()
            .map(|view| AgentSnapshot::new(view.position.x, view.position.y, view.radius))
            .collect(),
    }
}

fn emit<W: Write>(simulation: &dyn Simulation, out: &mut W) -> Result<()> {
    let frame = snapshot(simulation);
    serde_json::to_writer(&mut *out, &frame).context("Failed to encode frame")?;
    out.write_all(b"\n").context("Failed to write frame")?;
    log::debug!("Frame {} written ({} agents)", frame.tick, frame.agents.len());
    Ok(())
}

/// Advance `simulation` by `options.ticks`, writing the starting frame and
/// every `options.every`-th frame after it as JSON lines.
pub fn run<W: Write>(
    simulation: &mut dyn Simulation,
    options: &RunOptions,
    out: &mut W,
) -> Result<RunSummary> {
    if options.every == 0 {
        anyhow::bail!("Frame interval must be at least 1");
    }

    let start = Instant::now();
    let mut frames = 0;

    emit(simulation, out)?;
    frames += 1;

    for _ in 0..options.ticks {
        simulation.tick();
        if simulation.ticks() % options.every == 0 {
            emit(simulation, out)?;
            frames += 1;
        }
    }
    out.flush().context("Failed to flush output")?;

    let summary = RunSummary {
        ticks: options.ticks,
        frames,
        elapsed: start.elapsed(),
    };
    log::info!(
        "Ran {} ticks, wrote {} frames ({:.0} ticks/s)",
        summary.ticks,
        summary.frames,
        summary.ticks_per_second()
    );
    Ok(summary)
}
