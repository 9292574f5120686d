use alloc::vec::Vec;

use crate::config::{Bounds, ConfigError, WalkConfig};
use crate::engine::{AgentView, Simulation};
use crate::random::RandomSource;
use crate::vector::Vector2D;

pub const PARTICLE_RADIUS: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub position: Vector2D,
}

/// Particles that jitter independently by a uniform step every tick. They
/// are not confined to the view.
pub struct RandomWalk<R> {
    particles: Vec<Particle>,
    config: WalkConfig,
    rng: R,
    ticks: u64,
}

impl<R: RandomSource> RandomWalk<R> {
    pub fn new(config: WalkConfig, bounds: Bounds, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        bounds.validate()?;

        let particles = (0..config.population)
            .map(|_| Particle {
                position: Vector2D::new(
                    rng.range(0.0, bounds.width),
                    rng.range(0.0, bounds.height),
                ),
            })
            .collect();
        log::debug!("scattered {} walkers", config.population);

        Ok(Self {
            particles,
            config,
            rng,
            ticks: 0,
        })
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }
}

impl<R: RandomSource> Simulation for RandomWalk<R> {
    fn tick(&mut self) {
        let step = self.config.step;
        for particle in self.particles.iter_mut() {
            let dx = self.rng.range(-step, step);
            let dy = self.rng.range(-step, step);
            particle.position += Vector2D::new(dx, dy);
        }
        self.ticks += 1;
    }

    fn population(&self) -> usize {
        self.particles.len()
    }

    fn view(&self, index: usize) -> Option<AgentView> {
        self.particles.get(index).map(|particle| AgentView {
            position: particle.position,
            radius: PARTICLE_RADIUS,
        })
    }

    fn ticks(&self) -> u64 {
        self.ticks
    }
}
