//! Headless driver for the swarm simulations: builds a scene from optional
//! JSON settings, ticks it and streams frame snapshots as JSON lines.

pub mod driver;
pub mod settings;

pub use driver::{run, snapshot, RunOptions, RunSummary};
pub use settings::{build_scene, load_settings, Scene};
