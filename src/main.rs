//! Verlet Arena headless driver
//!
//! Usage: `verlet-arena [settings.json] [frames]`
//!
//! Builds the default 840x840 arena, drops particle clusters on a lattice of
//! spawn cells, runs the solver for a number of frames and logs how the pile
//! settles. Set `RUST_LOG=debug` (or `trace`) for per-update detail.

use std::process::ExitCode;

use glam::Vec2;
use verlet_arena::consts::{PARTICLE_RADIUS, PARTICLES_PER_CELL};
use verlet_arena::{Bounds, SimError, Solver, SolverSettings, Spawner};

const ARENA_CENTER: Vec2 = Vec2::new(420.0, 420.0);
const ARENA_SIZE: Vec2 = Vec2::new(840.0, 840.0);
const ARENA_OUTLINE: f32 = 5.0;
/// Spawn lattice spacing (one map tile)
const TILE_SIZE: f32 = 20.0;
const DEFAULT_FRAMES: u32 = 600;
const SEED: u64 = 0x5eed;
/// Repulsion pulse settings (mouse push in the interactive game)
const PULSE_EVERY: u32 = 120;
const PULSE_STRENGTH: f32 = 20.0;
const FRAME_DT: f32 = 1.0 / 60.0;

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), SimError> {
    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => SolverSettings::load(path)?,
        None => SolverSettings::default(),
    };
    let frames = match args.next() {
        Some(n) => n
            .parse::<u32>()
            .map_err(|e| SimError::InvalidConfiguration(format!("frames '{}': {}", n, e)))?,
        None => DEFAULT_FRAMES,
    };

    let bounds = Bounds::new(ARENA_CENTER, ARENA_SIZE, ARENA_OUTLINE)?;
    let mut solver = Solver::with_settings(settings)?;

    let spawn_cells = lattice(&bounds, 6);
    Spawner::new(SEED).scatter_cells(&mut solver, &spawn_cells, PARTICLES_PER_CELL, PARTICLE_RADIUS)?;
    log::info!(
        "Verlet Arena: {} particles, {} frames, seed {:#x}",
        solver.len(),
        frames,
        SEED
    );

    for frame in 1..=frames {
        if frame % PULSE_EVERY == 0 {
            solver.repel_from(bounds.center(), PULSE_STRENGTH, FRAME_DT);
        }
        solver.update(&bounds);

        if frame % 60 == 0 {
            report(frame, &solver);
        }
    }

    if frames % 60 != 0 {
        report(frames, &solver);
    }
    Ok(())
}

/// Spawn points on every `every`-th tile of the upper half of the arena
fn lattice(bounds: &Bounds, every: usize) -> Vec<Vec2> {
    let cols = (bounds.size().x / TILE_SIZE) as usize;
    let rows = (bounds.size().y / TILE_SIZE) as usize / 2;
    let tl = bounds.top_left();

    (1..rows)
        .step_by(every)
        .flat_map(|row| {
            (1..cols).step_by(every).map(move |col| {
                tl + Vec2::new(
                    col as f32 * TILE_SIZE + TILE_SIZE / 2.0,
                    row as f32 * TILE_SIZE + TILE_SIZE / 2.0,
                )
            })
        })
        .collect()
}

fn report(frame: u32, solver: &Solver) {
    let particles = solver.particles();
    if particles.is_empty() {
        log::info!("frame {}: no particles", frame);
        return;
    }

    let mean_speed =
        particles.iter().map(|p| p.velocity().length()).sum::<f32>() / particles.len() as f32;
    let (min, max) = particles.iter().fold(
        (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
        |(min, max), p| (min.min(p.position), max.max(p.position)),
    );
    log::info!(
        "frame {}: mean step {:.4}, extent {:.1}..{:.1}, {} grid cells",
        frame,
        mean_speed,
        min,
        max,
        solver.grid().occupied()
    );
}
