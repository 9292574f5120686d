use crate::config::{BoidConfig, Bounds};
use crate::engine::AgentView;
use crate::random::{random_heading, RandomSource};
use crate::vector::Vector2D;

/// Radius reported to renderers.
pub const BOID_RADIUS: f32 = 2.0;

/// A single boid entity
#[derive(Debug, Clone, PartialEq)]
pub struct Boid {
    pub position: Vector2D,
    pub velocity: Vector2D,
    /// Per-tick force accumulator, cleared by [`Boid::update`].
    pub acceleration: Vector2D,
    pub max_speed: f32,
    pub max_force: f32,
}

impl Boid {
    pub fn new(position: Vector2D, velocity: Vector2D, max_speed: f32, max_force: f32) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vector2D::zero(),
            max_speed,
            max_force,
        }
    }

    /// Boid at a uniform position inside `bounds`, heading in a random
    /// direction at unit speed.
    pub fn spawn<R: RandomSource + ?Sized>(
        rng: &mut R,
        bounds: Bounds,
        config: &BoidConfig,
    ) -> Self {
        let x = rng.range(0.0, bounds.width);
        let y = rng.range(0.0, bounds.height);
        let position = Vector2D::new(x, y);
        let velocity = random_heading(rng);
        Self::new(position, velocity, config.max_speed, config.max_force)
    }

    pub fn apply_force(&mut self, force: Vector2D) {
        self.acceleration += force;
    }

    /// Averaged away-from-neighbour vector, each diff weighted by inverse
    /// distance. Zero when nobody is inside `separation_distance`.
    pub fn separation_sum<'a, I>(&self, others: I, config: &BoidConfig) -> Vector2D
    where
        I: IntoIterator<Item = &'a Boid>,
    {
        let mut sum = Vector2D::zero();
        let mut count = 0;

        for other in others {
            let distance = self.position.distance(&other.position);
            if distance > 0.0 && distance < config.separation_distance {
                let diff = (self.position - other.position).normalize() / distance;
                sum += diff;
                count += 1;
            }
        }

        if count > 0 {
            sum / count as f32
        } else {
            sum
        }
    }

    pub fn separate<'a, I>(&self, others: I, config: &BoidConfig) -> Vector2D
    where
        I: IntoIterator<Item = &'a Boid>,
    {
        let sum = self.separation_sum(others, config);
        if sum.magnitude() > 0.0 {
            let desired = sum.set_magnitude(self.max_speed * config.separation_speed_factor);
            (desired - self.velocity).limit(self.max_force)
        } else {
            Vector2D::zero()
        }
    }

    pub fn align<'a, I>(&self, others: I, config: &BoidConfig) -> Vector2D
    where
        I: IntoIterator<Item = &'a Boid>,
    {
        let mut sum = Vector2D::zero();
        let mut count = 0;

        for other in others {
            let distance = self.position.distance(&other.position);
            if distance > 0.0 && distance < config.neighbor_distance {
                sum += other.velocity;
                count += 1;
            }
        }

        if count > 0 {
            let desired =
                (sum / count as f32).set_magnitude(self.max_speed * config.alignment_speed_factor);
            (desired - self.velocity).limit(self.max_force)
        } else {
            Vector2D::zero()
        }
    }

    pub fn cohere<'a, I>(&self, others: I, config: &BoidConfig) -> Vector2D
    where
        I: IntoIterator<Item = &'a Boid>,
    {
        let mut sum = Vector2D::zero();
        let mut count = 0;

        for other in others {
            let distance = self.position.distance(&other.position);
            if distance > 0.0 && distance < config.neighbor_distance {
                sum += other.position;
                count += 1;
            }
        }

        if count > 0 {
            self.seek(sum / count as f32) * config.cohesion_scale
        } else {
            Vector2D::zero()
        }
    }

    /// Steer toward `target` at full speed, limited to `max_force`.
    pub fn seek(&self, target: Vector2D) -> Vector2D {
        let desired = (target - self.position).set_magnitude(self.max_speed);
        (desired - self.velocity).limit(self.max_force)
    }

    /// Weighted sum of separation, alignment and cohesion against `others`.
    pub fn flocking_force(&self, others: &[Boid], config: &BoidConfig) -> Vector2D {
        let separation = self.separate(others, config) * config.separation_weight;
        let alignment = self.align(others, config) * config.alignment_weight;
        let cohesion = self.cohere(others, config) * config.cohesion_weight;
        separation + alignment + cohesion
    }

    /// Accumulate the flocking force into the acceleration.
    pub fn flock(&mut self, others: &[Boid], config: &BoidConfig) {
        let force = self.flocking_force(others, config);
        self.apply_force(force);
    }

    /// Inward push that ramps linearly from zero at `margin` to `max_speed`
    /// at the edge, capped at `max_force * strength`.
    pub fn wall_steer(&self, bounds: Bounds, margin: f32, strength: f32) -> Vector2D {
        let mut steer = Vector2D::zero();
        let Vector2D { x, y } = self.position;

        if x < margin {
            steer.x += self.max_speed * (margin - x) / margin;
        }
        if x > bounds.width - margin {
            steer.x -= self.max_speed * (x - (bounds.width - margin)) / margin;
        }
        if y < margin {
            steer.y += self.max_speed * (margin - y) / margin;
        }
        if y > bounds.height - margin {
            steer.y -= self.max_speed * (y - (bounds.height - margin)) / margin;
        }

        steer.limit(self.max_force * strength)
    }

    pub fn avoid_walls(&mut self, bounds: Bounds, margin: f32, strength: f32) {
        let steer = self.wall_steer(bounds, margin, strength);
        self.apply_force(steer);
    }

    pub fn update(&mut self) {
        self.velocity += self.acceleration;
        self.velocity = self.velocity.limit(self.max_speed);
        self.position += self.velocity;
        self.acceleration = Vector2D::zero();
    }

    /// Re-enter from the opposite edge, keeping both coordinates in
    /// `[0, bound)`.
    pub fn wrap(&mut self, bounds: Bounds) {
        self.position.x = wrap_axis(self.position.x, bounds.width);
        self.position.y = wrap_axis(self.position.y, bounds.height);
    }

    pub fn view(&self) -> AgentView {
        AgentView {
            position: self.position,
            radius: BOID_RADIUS,
        }
    }
}

/// Past the far edge resets to the origin; below the origin resets to the
/// last representable coordinate inside the bound.
fn wrap_axis(value: f32, bound: f32) -> f32 {
    if value >= bound {
        0.0
    } else if value < 0.0 {
        just_below(bound)
    } else {
        value
    }
}

fn just_below(bound: f32) -> f32 {
    if bound > 0.0 {
        f32::from_bits(bound.to_bits() - 1)
    } else {
        0.0
    }
}
