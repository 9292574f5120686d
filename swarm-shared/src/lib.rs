#![cfg_attr(not(feature = "std"), no_std)]

//! Serializable settings documents and frame snapshots exchanged between the
//! driver and anything rendering its output.
//!
//! Setting defaults mirror the presets in `swarm-core`'s `config` module;
//! the client checks the two stay identical.

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// One agent as seen by a renderer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AgentSnapshot {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl AgentSnapshot {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        Self { x, y, radius }
    }
}

/// Every agent after a given tick
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub agents: Vec<AgentSnapshot>,
}

/// Edge handling for a flock
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundarySettings {
    Wrap,
    AvoidWalls { margin: f32, strength: f32 },
}

/// Boid simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockSettings {
    pub population: usize,
    pub max_speed: f32,
    pub max_force: f32,
    pub separation_distance: f32,
    pub neighbor_distance: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub separation_speed_factor: f32,
    pub alignment_speed_factor: f32,
    pub cohesion_scale: f32,
    pub boundary: BoundarySettings,
}

impl FlockSettings {
    /// Bounded flock that steers away from the walls.
    pub fn walls() -> Self {
        Self {
            population: 200,
            max_speed: 4.0,
            max_force: 0.05,
            separation_distance: 30.0,
            neighbor_distance: 30.0,
            separation_weight: 1.5,
            alignment_weight: 0.9,
            cohesion_weight: 0.8,
            separation_speed_factor: 0.7,
            alignment_speed_factor: 0.7,
            cohesion_scale: 0.7,
            boundary: BoundarySettings::AvoidWalls {
                margin: 50.0,
                strength: 0.7,
            },
        }
    }

    /// Flock on a torus.
    pub fn wrap() -> Self {
        Self {
            population: 150,
            max_speed: 3.0,
            max_force: 0.05,
            separation_distance: 25.0,
            neighbor_distance: 50.0,
            separation_weight: 1.5,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            separation_speed_factor: 1.0,
            alignment_speed_factor: 1.0,
            cohesion_scale: 1.0,
            boundary: BoundarySettings::Wrap,
        }
    }
}

impl Default for FlockSettings {
    fn default() -> Self {
        Self::walls()
    }
}

/// Droplet physics model
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PhysicsSettings {
    MassScaled {
        min_mass: f32,
        max_mass: f32,
        size_per_mass: f32,
        reduction_factor: f32,
    },
    Friction {
        min_spawn_size: f32,
        max_spawn_size: f32,
        coefficient: f32,
        reduction_factor: f32,
    },
}

/// Droplet simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DropletSettings {
    pub population: usize,
    pub gravity: f32,
    pub spawn_band: f32,
    pub min_size: f32,
    pub physics: PhysicsSettings,
}

impl DropletSettings {
    pub fn melting() -> Self {
        Self {
            population: 10,
            gravity: 0.5,
            spawn_band: 50.0,
            min_size: 2.0,
            physics: PhysicsSettings::MassScaled {
                min_mass: 15.0,
                max_mass: 30.0,
                size_per_mass: 2.0,
                reduction_factor: 0.99,
            },
        }
    }

    pub fn friction() -> Self {
        Self {
            population: 10,
            gravity: 0.2,
            spawn_band: 50.0,
            min_size: 2.0,
            physics: PhysicsSettings::Friction {
                min_spawn_size: 10.0,
                max_spawn_size: 30.0,
                coefficient: 0.05,
                reduction_factor: 0.1,
            },
        }
    }
}

impl Default for DropletSettings {
    fn default() -> Self {
        Self::melting()
    }
}

/// Random-walk configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WalkSettings {
    pub population: usize,
    pub step: f32,
}

impl Default for WalkSettings {
    fn default() -> Self {
        Self {
            population: 100,
            step: 1.0,
        }
    }
}

/// Optional settings document; sections that are absent keep the scene's
/// built-in values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SettingsFile {
    pub flock: Option<FlockSettings>,
    pub droplets: Option<DropletSettings>,
    pub walk: Option<WalkSettings>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_flock_settings_fill_defaults() {
        let settings: FlockSettings =
            serde_json::from_str(r#"{"population": 12, "max_speed": 2.5}"#).unwrap();
        assert_eq!(settings.population, 12);
        assert_eq!(settings.max_speed, 2.5);
        assert_eq!(settings.separation_weight, 1.5);
        assert_eq!(
            settings.boundary,
            BoundarySettings::AvoidWalls {
                margin: 50.0,
                strength: 0.7
            }
        );
    }

    #[test]
    fn test_tagged_boundary() {
        let settings: FlockSettings =
            serde_json::from_str(r#"{"boundary": {"kind": "wrap"}}"#).unwrap();
        assert_eq!(settings.boundary, BoundarySettings::Wrap);
    }

    #[test]
    fn test_friction_physics_parses() {
        let json = r#"{
            "gravity": 0.3,
            "physics": {
                "kind": "friction",
                "min_spawn_size": 8.0,
                "max_spawn_size": 16.0,
                "coefficient": 0.1,
                "reduction_factor": 0.05
            }
        }"#;
        let settings: DropletSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.gravity, 0.3);
        assert_eq!(settings.population, 10);
        assert!(matches!(
            settings.physics,
            PhysicsSettings::Friction { coefficient, .. } if coefficient == 0.1
        ));
    }

    #[test]
    fn test_frame_snapshot_json_shape() {
        let frame = FrameSnapshot {
            tick: 3,
            agents: vec![AgentSnapshot::new(1.0, 2.0, 0.5)],
        };
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["tick"], 3);
        assert_eq!(json["agents"][0]["radius"], 0.5);
    }

    #[test]
    fn test_empty_settings_file() {
        let file: SettingsFile = serde_json::from_str("{}").unwrap();
        assert_eq!(file, SettingsFile::default());
    }
}
