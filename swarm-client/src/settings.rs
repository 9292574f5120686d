use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use swarm_core::{
    Boundary, Bounds, BoidConfig, DropletConfig, DropletPhysics, Flock, Melt, RandomWalk,
    Simulation, WalkConfig,
};
use swarm_shared::{
    BoundarySettings, DropletSettings, FlockSettings, PhysicsSettings, SettingsFile, WalkSettings,
};

/// Which simulation to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Scene {
    /// Bounded flock steering away from the walls
    FlockWalls,
    /// Flock on a torus
    FlockWrap,
    /// Mass-scaled wax droplets with trails
    Melt,
    /// Shrinking droplets slowed by friction
    Friction,
    /// Random-walk particles
    Walk,
}

/// Read a JSON settings document.
pub fn load_settings(path: &Path) -> Result<SettingsFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings from {}", path.display()))?;
    let settings = serde_json::from_str(&text)
        .with_context(|| format!("Invalid settings in {}", path.display()))?;
    Ok(settings)
}

pub fn flock_config(settings: &FlockSettings) -> BoidConfig {
    BoidConfig {
        population: settings.population,
        max_speed: settings.max_speed,
        max_force: settings.max_force,
        separation_distance: settings.separation_distance,
        neighbor_distance: settings.neighbor_distance,
        separation_weight: settings.separation_weight,
        alignment_weight: settings.alignment_weight,
        cohesion_weight: settings.cohesion_weight,
        separation_speed_factor: settings.separation_speed_factor,
        alignment_speed_factor: settings.alignment_speed_factor,
        cohesion_scale: settings.cohesion_scale,
        boundary: match settings.boundary {
            BoundarySettings::Wrap => Boundary::Wrap,
            BoundarySettings::AvoidWalls { margin, strength } => {
                Boundary::AvoidWalls { margin, strength }
            }
        },
    }
}

pub fn droplet_config(settings: &DropletSettings) -> DropletConfig {
    let physics = match settings.physics {
        PhysicsSettings::MassScaled {
            min_mass,
            max_mass,
            size_per_mass,
            reduction_factor,
        } => DropletPhysics::MassScaled {
            min_mass,
            max_mass,
            size_per_mass,
            reduction_factor,
        },
        PhysicsSettings::Friction {
            min_spawn_size,
            max_spawn_size,
            coefficient,
            reduction_factor,
        } => DropletPhysics::Friction {
            min_spawn_size,
            max_spawn_size,
            coefficient,
            reduction_factor,
        },
    };

    DropletConfig {
        population: settings.population,
        gravity: settings.gravity,
        spawn_band: settings.spawn_band,
        min_size: settings.min_size,
        physics,
    }
}

pub fn walk_config(settings: &WalkSettings) -> WalkConfig {
    WalkConfig {
        population: settings.population,
        step: settings.step,
    }
}

/// Build the engine for `scene`. A section present in `settings` replaces
/// the scene's built-in values wholesale.
pub fn build_scene(
    scene: Scene,
    settings: &SettingsFile,
    bounds: Bounds,
    seed: u64,
) -> Result<Box<dyn Simulation>> {
    let mut rng = SmallRng::seed_from_u64(seed);

    let simulation: Box<dyn Simulation> = match scene {
        Scene::FlockWalls | Scene::FlockWrap => {
            let config = match &settings.flock {
                Some(flock) => flock_config(flock),
                None if scene == Scene::FlockWalls => BoidConfig::wall_avoiding(),
                None => BoidConfig::wrapping(),
            };
            Box::new(Flock::new(config, bounds, &mut rng).context("Invalid flock settings")?)
        }
        Scene::Melt | Scene::Friction => {
            let config = match &settings.droplets {
                Some(droplets) => droplet_config(droplets),
                None if scene == Scene::Melt => DropletConfig::melting(),
                None => DropletConfig::frictional(),
            };
            Box::new(Melt::new(config, bounds, rng).context("Invalid droplet settings")?)
        }
        Scene::Walk => {
            let config = settings.walk.as_ref().map(walk_config).unwrap_or_default();
            Box::new(RandomWalk::new(config, bounds, rng).context("Invalid walk settings")?)
        }
    };

    log::debug!(
        "Built {:?} scene with {} agents (seed {})",
        scene,
        simulation.population(),
        seed
    );
    Ok(simulation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarm_core::SimulationExt;

    #[test]
    fn test_default_settings_match_core_presets() {
        assert_eq!(flock_config(&FlockSettings::walls()), BoidConfig::wall_avoiding());
        assert_eq!(flock_config(&FlockSettings::wrap()), BoidConfig::wrapping());
        assert_eq!(droplet_config(&DropletSettings::melting()), DropletConfig::melting());
        assert_eq!(droplet_config(&DropletSettings::friction()), DropletConfig::frictional());
        assert_eq!(walk_config(&WalkSettings::default()), WalkConfig::default());
    }

    #[test]
    fn test_missing_sections_use_core_presets() {
        let bounds = Bounds::new(600.0, 600.0);
        let built = build_scene(Scene::FlockWrap, &SettingsFile::default(), bounds, 9).unwrap();

        let mut rng = SmallRng::seed_from_u64(9);
        let direct = Flock::new(BoidConfig::wrapping(), bounds, &mut rng).unwrap();

        assert!(built.views().eq(direct.views()));
    }

    #[test]
    fn test_build_every_scene() {
        let bounds = Bounds::new(600.0, 600.0);
        let settings = SettingsFile::default();
        let expected = [
            (Scene::FlockWalls, 200),
            (Scene::FlockWrap, 150),
            (Scene::Melt, 10),
            (Scene::Friction, 10),
            (Scene::Walk, 100),
        ];
        for (scene, population) in expected {
            let simulation = build_scene(scene, &settings, bounds, 42).unwrap();
            assert_eq!(simulation.population(), population, "{scene:?}");
        }
    }

    #[test]
    fn test_invalid_settings_are_reported() {
        let settings = SettingsFile {
            flock: Some(FlockSettings {
                max_speed: -1.0,
                ..FlockSettings::walls()
            }),
            ..SettingsFile::default()
        };
        let err = build_scene(Scene::FlockWalls, &settings, Bounds::new(600.0, 600.0), 1)
            .err()
            .unwrap();
        let message = format!("{err:#}");
        assert!(message.contains("Invalid flock settings"));
        assert!(message.contains("max_speed"));
    }

    #[test]
    fn test_missing_settings_file() {
        let err = load_settings(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read settings"));
    }
}
