//! Fixed tunables for every simulation.
//!
//! Values are chosen once, before an engine is built, and are never mutated
//! while it runs. Each config has a preset matching the sketch it came from
//! and a `validate` used by the engine constructors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("`{field}` must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("`{field}` must lie within [{min}, {max}], got {value}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("`{field}` range is inverted: {min} > {max}")]
    InvertedRange {
        field: &'static str,
        min: f32,
        max: f32,
    },

    #[error("{0} population must not be empty")]
    EmptyPopulation(&'static str),
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn within(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

fn ordered(field: &'static str, min: f32, max: f32) -> Result<(), ConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(ConfigError::InvertedRange { field, min, max })
    }
}

/// The visible area, with the origin at the top-left corner and y growing
/// downwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("width", self.width)?;
        positive("height", self.height)
    }
}

/// How boids treat the edges of the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Boundary {
    /// Toroidal topology: leaving one edge re-enters from the opposite one.
    Wrap,
    /// Steer away from edges closer than `margin`; the wall steer is capped
    /// at `max_force * strength`.
    AvoidWalls { margin: f32, strength: f32 },
}

/// Configuration for the boid simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoidConfig {
    pub population: usize,
    pub max_speed: f32,
    pub max_force: f32,
    pub separation_distance: f32,
    pub neighbor_distance: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    /// Fraction of `max_speed` the separation steer aims for.
    pub separation_speed_factor: f32,
    /// Fraction of `max_speed` the alignment steer aims for.
    pub alignment_speed_factor: f32,
    /// Multiplier on the cohesion seek, applied before `cohesion_weight`.
    pub cohesion_scale: f32,
    pub boundary: Boundary,
}

impl BoidConfig {
    /// Bounded flock that turns gradually before reaching the walls.
    pub const fn wall_avoiding() -> Self {
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
            boundary: Boundary::AvoidWalls {
                margin: 50.0,
                strength: 0.7,
            },
        }
    }

    /// Classic flock on a torus.
    pub const fn wrapping() -> Self {
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
            boundary: Boundary::Wrap,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population == 0 {
            return Err(ConfigError::EmptyPopulation("boid"));
        }
        positive("max_speed", self.max_speed)?;
        positive("max_force", self.max_force)?;
        positive("separation_distance", self.separation_distance)?;
        positive("neighbor_distance", self.neighbor_distance)?;
        within("separation_weight", self.separation_weight, 0.0, f32::MAX)?;
        within("alignment_weight", self.alignment_weight, 0.0, f32::MAX)?;
        within("cohesion_weight", self.cohesion_weight, 0.0, f32::MAX)?;
        within(
            "separation_speed_factor",
            self.separation_speed_factor,
            0.0,
            f32::MAX,
        )?;
        within(
            "alignment_speed_factor",
            self.alignment_speed_factor,
            0.0,
            f32::MAX,
        )?;
        // Above 1 the scaled seek could exceed `max_force`.
        within("cohesion_scale", self.cohesion_scale, 0.0, 1.0)?;
        if let Boundary::AvoidWalls { margin, strength } = self.boundary {
            positive("margin", margin)?;
            within("strength", strength, 0.0, f32::MAX)?;
        }
        Ok(())
    }
}

impl Default for BoidConfig {
    fn default() -> Self {
        Self::wall_avoiding()
    }
}

/// Droplet physics model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropletPhysics {
    /// Gravity is divided by mass; size shrinks multiplicatively and a trail
    /// of recent positions is kept.
    MassScaled {
        min_mass: f32,
        max_mass: f32,
        size_per_mass: f32,
        /// Per-tick multiplier on size, close to 1 for a slow melt.
        reduction_factor: f32,
    },
    /// Gravity acts directly; a friction impulse of `coefficient / size`
    /// opposes motion and size shrinks by `size * reduction_factor` per tick.
    Friction {
        min_spawn_size: f32,
        max_spawn_size: f32,
        coefficient: f32,
        reduction_factor: f32,
    },
}

impl DropletPhysics {
    pub const fn mass_scaled() -> Self {
        Self::MassScaled {
            min_mass: 15.0,
            max_mass: 30.0,
            size_per_mass: 2.0,
            reduction_factor: 0.99,
        }
    }

    pub const fn friction() -> Self {
        Self::Friction {
            min_spawn_size: 10.0,
            max_spawn_size: 30.0,
            coefficient: 0.05,
            reduction_factor: 0.1,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::MassScaled {
                min_mass,
                max_mass,
                size_per_mass,
                reduction_factor,
            } => {
                positive("min_mass", min_mass)?;
                positive("max_mass", max_mass)?;
                ordered("mass", min_mass, max_mass)?;
                positive("size_per_mass", size_per_mass)?;
                within("reduction_factor", reduction_factor, f32::MIN_POSITIVE, 1.0)
            }
            Self::Friction {
                min_spawn_size,
                max_spawn_size,
                coefficient,
                reduction_factor,
            } => {
                positive("min_spawn_size", min_spawn_size)?;
                positive("max_spawn_size", max_spawn_size)?;
                ordered("spawn_size", min_spawn_size, max_spawn_size)?;
                within("coefficient", coefficient, 0.0, f32::MAX)?;
                within("reduction_factor", reduction_factor, 0.0, 1.0)
            }
        }
    }
}

/// Configuration for the droplet simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropletConfig {
    pub population: usize,
    /// Downward pull applied every tick.
    pub gravity: f32,
    /// Respawned droplets start with y uniform in `[-spawn_band, 0)`.
    pub spawn_band: f32,
    /// Size floor; mass-scaled droplets below it count as melted.
    pub min_size: f32,
    pub physics: DropletPhysics,
}

impl DropletConfig {
    /// Slowly melting wax drops with trails.
    pub const fn melting() -> Self {
        Self {
            population: 10,
            gravity: 0.5,
            spawn_band: 50.0,
            min_size: 2.0,
            physics: DropletPhysics::mass_scaled(),
        }
    }

    /// Quickly shrinking drops slowed by friction.
    pub const fn frictional() -> Self {
        Self {
            population: 10,
            gravity: 0.2,
            spawn_band: 50.0,
            min_size: 2.0,
            physics: DropletPhysics::friction(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population == 0 {
            return Err(ConfigError::EmptyPopulation("droplet"));
        }
        within("gravity", self.gravity, f32::MIN, f32::MAX)?;
        within("spawn_band", self.spawn_band, 0.0, f32::MAX)?;
        positive("min_size", self.min_size)?;
        self.physics.validate()?;
        if let DropletPhysics::Friction { min_spawn_size, .. } = self.physics {
            within("min_spawn_size", min_spawn_size, self.min_size, f32::MAX)?;
        }
        Ok(())
    }
}

impl Default for DropletConfig {
    fn default() -> Self {
        Self::melting()
    }
}

/// Configuration for the random-walk particles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkConfig {
    pub population: usize,
    /// Each axis moves by a uniform amount in `[-step, step)` per tick.
    pub step: f32,
}

impl WalkConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population == 0 {
            return Err(ConfigError::EmptyPopulation("particle"));
        }
        positive("step", self.step)
    }
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            population: 100,
            step: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        assert!(BoidConfig::wall_avoiding().validate().is_ok());
        assert!(BoidConfig::wrapping().validate().is_ok());
        assert!(DropletConfig::melting().validate().is_ok());
        assert!(DropletConfig::frictional().validate().is_ok());
        assert!(WalkConfig::default().validate().is_ok());
        assert!(Bounds::new(600.0, 600.0).validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_speed() {
        let config = BoidConfig {
            max_speed: 0.0,
            ..BoidConfig::wrapping()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "max_speed",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_rejects_nan_force() {
        let config = BoidConfig {
            max_force: f32::NAN,
            ..BoidConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "max_force",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_empty_population() {
        let config = DropletConfig {
            population: 0,
            ..DropletConfig::melting()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyPopulation("droplet"))
        );
    }

    #[test]
    fn test_rejects_inverted_mass_range() {
        let config = DropletConfig {
            physics: DropletPhysics::MassScaled {
                min_mass: 30.0,
                max_mass: 15.0,
                size_per_mass: 2.0,
                reduction_factor: 0.99,
            },
            ..DropletConfig::melting()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedRange { field: "mass", .. })
        ));
    }

    #[test]
    fn test_rejects_growing_droplets() {
        let config = DropletConfig {
            physics: DropletPhysics::MassScaled {
                min_mass: 15.0,
                max_mass: 30.0,
                size_per_mass: 2.0,
                reduction_factor: 1.5,
            },
            ..DropletConfig::melting()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "reduction_factor",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_spawn_below_floor() {
        let config = DropletConfig {
            physics: DropletPhysics::Friction {
                min_spawn_size: 0.5,
                max_spawn_size: 1.0,
                coefficient: 0.05,
                reduction_factor: 0.1,
            },
            ..DropletConfig::frictional()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "min_spawn_size",
                min,
                ..
            }) if min == 2.0
        ));
    }

    #[test]
    fn test_accepts_spawn_at_floor() {
        let config = DropletConfig {
            physics: DropletPhysics::Friction {
                min_spawn_size: 2.0,
                max_spawn_size: 4.0,
                coefficient: 0.05,
                reduction_factor: 0.1,
            },
            ..DropletConfig::frictional()
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_rejects_cohesion_scale_above_one() {
        let config = BoidConfig {
            cohesion_scale: 1.5,
            ..BoidConfig::wrapping()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "cohesion_scale",
                ..
            })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::NotPositive {
            field: "width",
            value: -1.0,
        };
        assert_eq!(
            err.to_string(),
            "`width` must be a positive finite number, got -1"
        );
        assert_eq!(
            ConfigError::EmptyPopulation("boid").to_string(),
            "boid population must not be empty"
        );
    }
}
