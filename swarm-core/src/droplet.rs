use crate::config::{Bounds, DropletConfig, DropletPhysics};
use crate::engine::AgentView;
use crate::random::RandomSource;
use crate::vector::Vector2D;

/// Number of past positions a mass-scaled droplet remembers.
pub const TRAIL_CAPACITY: usize = 50;

/// Recent positions, oldest first.
pub type Trail = heapless::Deque<Vector2D, TRAIL_CAPACITY>;

/// A falling, melting wax droplet
#[derive(Debug, Clone)]
pub struct Droplet {
    pub position: Vector2D,
    pub velocity: Vector2D,
    /// Per-tick force accumulator, cleared by [`Droplet::update`].
    pub acceleration: Vector2D,
    /// Diameter.
    pub size: f32,
    /// Divides every applied force. Frictional droplets carry unit mass.
    pub mass: f32,
    pub trail: Trail,
}

impl Droplet {
    pub fn new(position: Vector2D, mass: f32, size: f32) -> Self {
        Self {
            position,
            velocity: Vector2D::zero(),
            acceleration: Vector2D::zero(),
            size,
            mass,
            trail: Trail::new(),
        }
    }

    /// Droplet at a uniform x inside the view and a uniform y in
    /// `[-band, 0)`, above the top edge.
    pub fn spawn<R: RandomSource + ?Sized>(
        rng: &mut R,
        bounds: Bounds,
        config: &DropletConfig,
        band: f32,
    ) -> Self {
        let position = Vector2D::new(rng.range(0.0, bounds.width), rng.range(-band, 0.0));
        match config.physics {
            DropletPhysics::MassScaled {
                min_mass,
                max_mass,
                size_per_mass,
                ..
            } => {
                let mass = rng.range(min_mass, max_mass);
                Self::new(position, mass, mass * size_per_mass)
            }
            DropletPhysics::Friction {
                min_spawn_size,
                max_spawn_size,
                ..
            } => Self::new(position, 1.0, rng.range(min_spawn_size, max_spawn_size)),
        }
    }

    /// Reset to a fresh spawn in place, reusing the trail storage.
    pub fn respawn<R: RandomSource + ?Sized>(
        &mut self,
        rng: &mut R,
        bounds: Bounds,
        config: &DropletConfig,
    ) {
        let fresh = Self::spawn(rng, bounds, config, config.spawn_band);
        self.position = fresh.position;
        self.velocity = fresh.velocity;
        self.acceleration = fresh.acceleration;
        self.size = fresh.size;
        self.mass = fresh.mass;
        self.trail.clear();
    }

    pub fn apply_force(&mut self, force: Vector2D) {
        self.acceleration += force / self.mass;
    }

    /// Integrate one tick. Velocity is never capped.
    pub fn update(&mut self, config: &DropletConfig) {
        self.velocity += self.acceleration;
        if let DropletPhysics::Friction { coefficient, .. } = config.physics {
            let drag = self.velocity.normalize() * (coefficient / self.size);
            self.velocity -= drag;
        }
        self.position += self.velocity;
        self.acceleration = Vector2D::zero();

        match config.physics {
            DropletPhysics::MassScaled {
                reduction_factor, ..
            } => {
                self.size *= reduction_factor;
                self.record_trail();
            }
            DropletPhysics::Friction {
                reduction_factor, ..
            } => {
                self.size = (self.size - self.size * reduction_factor).max(config.min_size);
            }
        }
    }

    fn record_trail(&mut self) {
        if self.trail.is_full() {
            self.trail.pop_front();
        }
        // Cannot fail: a slot was just freed.
        let _ = self.trail.push_back(self.position);
    }

    /// Whether the droplet has fallen out of view or melted away.
    pub fn is_off_screen(&self, bounds: Bounds, config: &DropletConfig) -> bool {
        match config.physics {
            DropletPhysics::MassScaled { .. } => {
                self.position.y > bounds.height || self.size < config.min_size
            }
            DropletPhysics::Friction { .. } => self.position.y > bounds.height + self.size,
        }
    }

    pub fn view(&self) -> AgentView {
        AgentView {
            position: self.position,
            radius: self.size / 2.0,
        }
    }
}
