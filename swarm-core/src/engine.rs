use alloc::vec::Vec;

use crate::boid::Boid;
use crate::config::{Boundary, Bounds, BoidConfig, ConfigError, DropletConfig};
use crate::droplet::Droplet;
use crate::random::RandomSource;
use crate::vector::Vector2D;

/// What a renderer needs to draw one agent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentView {
    pub position: Vector2D,
    pub radius: f32,
}

/// A population advanced one frame at a time by an external driver.
pub trait Simulation {
    /// Advance exactly one step.
    fn tick(&mut self);

    /// Number of agents; constant for the lifetime of the simulation.
    fn population(&self) -> usize;

    fn view(&self, index: usize) -> Option<AgentView>;

    /// Ticks completed so far.
    fn ticks(&self) -> u64;
}

/// Iteration over a simulation's agents, for concrete engines and
/// `dyn Simulation` alike.
pub trait SimulationExt: Simulation {
    fn views(&self) -> Views<'_, Self> {
        Views {
            simulation: self,
            index: 0,
        }
    }
}

impl<S: Simulation + ?Sized> SimulationExt for S {}

/// Iterator over every agent's [`AgentView`].
pub struct Views<'a, S: Simulation + ?Sized> {
    simulation: &'a S,
    index: usize,
}

impl<S: Simulation + ?Sized> Iterator for Views<'_, S> {
    type Item = AgentView;

    fn next(&mut self) -> Option<AgentView> {
        let view = self.simulation.view(self.index)?;
        self.index += 1;
        Some(view)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.simulation.population().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<S: Simulation + ?Sized> ExactSizeIterator for Views<'_, S> {}

/// A fixed-size flock of boids
pub struct Flock {
    boids: Vec<Boid>,
    config: BoidConfig,
    bounds: Bounds,
    forces: Vec<Vector2D>,
    ticks: u64,
}

impl Flock {
    pub fn new<R: RandomSource + ?Sized>(
        config: BoidConfig,
        bounds: Bounds,
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        bounds.validate()?;

        let boids = (0..config.population)
            .map(|_| Boid::spawn(rng, bounds, &config))
            .collect();
        log::debug!(
            "spawned flock of {} boids in {}x{} ({:?})",
            config.population,
            bounds.width,
            bounds.height,
            config.boundary
        );

        Ok(Self::assemble(boids, config, bounds))
    }

    /// Flock over hand-placed boids. The population is `boids.len()`.
    pub fn from_boids(
        boids: Vec<Boid>,
        config: BoidConfig,
        bounds: Bounds,
    ) -> Result<Self, ConfigError> {
        BoidConfig {
            population: boids.len(),
            ..config
        }
        .validate()?;
        bounds.validate()?;
        Ok(Self::assemble(boids, config, bounds))
    }

    fn assemble(boids: Vec<Boid>, config: BoidConfig, bounds: Bounds) -> Self {
        let forces = Vec::with_capacity(boids.len());
        Self {
            boids,
            config,
            bounds,
            forces,
            ticks: 0,
        }
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn config(&self) -> &BoidConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

impl Simulation for Flock {
    fn tick(&mut self) {
        // Every force reads pre-tick state; nothing moves until all are known.
        self.forces.clear();
        for boid in self.boids.iter() {
            let mut force = boid.flocking_force(&self.boids, &self.config);
            if let Boundary::AvoidWalls { margin, strength } = self.config.boundary {
                force += boid.wall_steer(self.bounds, margin, strength);
            }
            self.forces.push(force);
        }

        for (boid, force) in self.boids.iter_mut().zip(self.forces.iter()) {
            boid.apply_force(*force);
            boid.update();
            if self.config.boundary == Boundary::Wrap {
                boid.wrap(self.bounds);
            }
        }

        self.ticks += 1;
    }

    fn population(&self) -> usize {
        self.boids.len()
    }

    fn view(&self, index: usize) -> Option<AgentView> {
        self.boids.get(index).map(Boid::view)
    }

    fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// A fixed-size pool of melting wax droplets
pub struct Melt<R> {
    droplets: Vec<Droplet>,
    config: DropletConfig,
    bounds: Bounds,
    gravity: Vector2D,
    rng: R,
    ticks: u64,
    respawns: u64,
}

impl<R: RandomSource> Melt<R> {
    /// Fill the pool with droplets scattered over a band one view tall above
    /// the top edge, so they arrive staggered.
    pub fn new(config: DropletConfig, bounds: Bounds, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        bounds.validate()?;

        let droplets = (0..config.population)
            .map(|_| Droplet::spawn(&mut rng, bounds, &config, bounds.height))
            .collect();
        log::debug!(
            "spawned {} droplets in {}x{} ({:?})",
            config.population,
            bounds.width,
            bounds.height,
            config.physics
        );

        Ok(Self {
            droplets,
            gravity: Vector2D::new(0.0, config.gravity),
            config,
            bounds,
            rng,
            ticks: 0,
            respawns: 0,
        })
    }

    pub fn droplets(&self) -> &[Droplet] {
        &self.droplets
    }

    pub fn config(&self) -> &DropletConfig {
        &self.config
    }

    /// Droplets replaced since construction.
    pub fn respawns(&self) -> u64 {
        self.respawns
    }
}

impl<R: RandomSource> Simulation for Melt<R> {
    fn tick(&mut self) {
        for droplet in self.droplets.iter_mut() {
            droplet.apply_force(self.gravity);
            droplet.update(&self.config);
        }

        for (index, droplet) in self.droplets.iter_mut().enumerate() {
            if droplet.is_off_screen(self.bounds, &self.config) {
                log::trace!(
                    "droplet {} gone at ({:.1}, {:.1}) size {:.2}, respawning",
                    index,
                    droplet.position.x,
                    droplet.position.y,
                    droplet.size
                );
                droplet.respawn(&mut self.rng, self.bounds, &self.config);
                self.respawns += 1;
            }
        }

        self.ticks += 1;
    }

    fn population(&self) -> usize {
        self.droplets.len()
    }

    fn view(&self, index: usize) -> Option<AgentView> {
        self.droplets.get(index).map(Droplet::view)
    }

    fn ticks(&self) -> u64 {
        self.ticks
    }
}
