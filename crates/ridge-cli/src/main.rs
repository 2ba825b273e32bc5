//! Ridgeline CLI - Generate, inspect and walk height-field terrains

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{generate, inspect, sample, walk, FractalArgs, SourceArgs};
use ridge_core::RidgeConfig;

#[derive(Parser)]
#[command(name = "ridge")]
#[command(about = "Height-field terrain toolkit: synthesize, sample and walk terrains", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.ridge/config.toml layered under ./ridge.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a diamond-square terrain and write it as a grayscale PNG
    Generate {
        /// Output image path
        #[arg(short, long, default_value = "terrain.png")]
        output: PathBuf,

        #[command(flatten)]
        fractal: FractalArgs,
    },

    /// Print grid, mesh and patch statistics for a terrain
    Inspect {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Query elevations at world coordinates
    Sample {
        #[command(flatten)]
        source: SourceArgs,

        /// World coordinate to sample (comma-separated x,z); repeatable
        #[arg(long = "at", value_parser = parse_vec2, required = true, allow_hyphen_values = true)]
        at: Vec<[f32; 2]>,
    },

    /// Simulate a walker following a path across a terrain
    Walk {
        /// Path file of whitespace-separated x y z triples (grid units)
        path: PathBuf,

        #[command(flatten)]
        source: SourceArgs,

        /// Simulated duration in seconds
        #[arg(long, default_value = "10")]
        seconds: f32,

        /// Time step in seconds
        #[arg(long, default_value = "0.1")]
        dt: f32,

        /// Walker speed override (world units per second)
        #[arg(long)]
        speed: Option<f32>,

        /// Print every Nth step
        #[arg(long, default_value = "10")]
        every: usize,
    },
}

fn parse_vec2(s: &str) -> Result<[f32; 2], String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(format!("expected 2 comma-separated values, got {}", parts.len()));
    }
    let x: f32 = parts[0].trim().parse().map_err(|e| format!("invalid x: {}", e))?;
    let z: f32 = parts[1].trim().parse().map_err(|e| format!("invalid z: {}", e))?;
    Ok([x, z])
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RidgeConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => RidgeConfig::load().context("Failed to load config")?,
    };
    log::debug!("Resolved config: {:?}", config);

    match cli.command {
        Commands::Generate { output, fractal } => generate::run(&output, &fractal, &config),
        Commands::Inspect { source } => inspect::run(&source, &config),
        Commands::Sample { source, at } => sample::run(&source, &at, &config),
        Commands::Walk {
            path,
            source,
            seconds,
            dt,
            speed,
            every,
        } => walk::run(
            walk::WalkArgs {
                path,
                seconds,
                dt,
                speed,
                every,
            },
            &source,
            &config,
        ),
    }
}
