use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use swarm_client::{build_scene, load_settings, run, RunOptions, Scene};
use swarm_core::Bounds;
use swarm_shared::SettingsFile;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless flock and droplet simulator", long_about = None)]
struct Args {
    /// Simulation to run
    #[arg(short, long, value_enum, default_value_t = Scene::FlockWalls)]
    scene: Scene,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Random seed; a fresh one is drawn and logged when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// View width
    #[arg(long, default_value_t = 600.0)]
    width: f32,

    /// View height
    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// JSON settings file overriding the scene's built-in tunables
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Write a frame every N ticks
    #[arg(short, long, default_value_t = 1)]
    every: u64,

    /// Write frames here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let settings = match &args.settings {
        Some(path) => load_settings(path)?,
        None => SettingsFile::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    let bounds = Bounds::new(args.width, args.height);

    log::info!("Scene: {:?}", args.scene);
    log::info!("View: {}x{}", args.width, args.height);
    log::info!("Seed: {}", seed);

    let mut simulation = build_scene(args.scene, &settings, bounds, seed)
        .context("Failed to initialize simulation")?;

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let options = RunOptions {
        ticks: args.ticks,
        every: args.every,
    };
    run(simulation.as_mut(), &options, &mut out).context("Simulation run failed")?;

    Ok(())
}
