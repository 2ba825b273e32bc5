//! Path walking simulation command

use std::path::PathBuf;

use anyhow::{Context, Result};
use ridge_core::RidgeConfig;
use ridge_path::{PathWalker, TrailPath};

use super::{load_terrain, SourceArgs};

pub struct WalkArgs {
    pub path: PathBuf,
    pub seconds: f32,
    pub dt: f32,
    pub speed: Option<f32>,
    pub every: usize,
}

pub fn run(args: WalkArgs, source: &SourceArgs, config: &RidgeConfig) -> Result<()> {
    if !(args.dt > 0.0) {
        anyhow::bail!("--dt must be positive, got {}", args.dt);
    }

    let terrain = load_terrain(source, config)?;
    let trail = TrailPath::load(
        &args.path,
        &terrain,
        terrain.path_scale(),
        &config.path,
    )
    .with_context(|| format!("Failed to load path '{}'", args.path.display()))?;

    println!(
        "Path: {} points, {:.2} world units",
        trail.len(),
        trail.length()
    );

    let speed = args.speed.unwrap_or(config.walker.speed);
    let mut walker = PathWalker::new(&trail, speed);
    let steps = (args.seconds / args.dt).ceil() as usize;
    let every = args.every.max(1);

    let print = |t: f32, walker: &PathWalker| {
        let p = walker.position();
        println!(
            "t={:7.2}s  segment {:>3}  pos ({:.2}, {:.2}, {:.2})",
            t,
            walker.segment(),
            p.x,
            p.y,
            p.z
        );
    };

    print(0.0, &walker);
    for step in 1..=steps {
        walker.update(args.dt, &terrain);
        if step % every == 0 || step == steps {
            print(step as f32 * args.dt, &walker);
        }
    }
    Ok(())
}
