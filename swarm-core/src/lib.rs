#![cfg_attr(not(feature = "std"), no_std)]

//! Frame-stepped agent simulations: a boid flock, a pool of melting wax
//! droplets and a field of random-walk particles.
//!
//! Every engine is driven by an external loop that calls
//! [`Simulation::tick`] once per frame and then reads agent state back
//! through [`SimulationExt::views`] for rendering.

extern crate alloc;

pub mod boid;
pub mod config;
pub mod droplet;
pub mod engine;
pub mod random;
pub mod vector;
pub mod walk;

pub use boid::Boid;
pub use config::{
    Boundary, Bounds, BoidConfig, ConfigError, DropletConfig, DropletPhysics, WalkConfig,
};
pub use droplet::{Droplet, Trail, TRAIL_CAPACITY};
pub use engine::{AgentView, Flock, Melt, Simulation, SimulationExt, Views};
pub use random::{random_heading, RandomSource};
pub use vector::Vector2D;
pub use walk::{Particle, RandomWalk};
