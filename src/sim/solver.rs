//! Particle solver
//!
//! Owns the particles and the spatial hash grid. Each `update` call:
//! 1. adds gravity to every particle's accumulator,
//! 2. rebuilds the grid from the current positions,
//! 3. runs the fixed sub-steps: wall bounce + integration per particle, then
//!    pairwise separation using the grid from step 2.
//!
//! The grid is not rebuilt between sub-steps, so cell membership can lag a
//! little behind fast particles within one update.
//!
//! Grid payloads are indices into `particles`. They are valid for the duration
//! of one update; `update` holds `&mut self`, so nothing can add or remove
//! particles while they are in use.

use glam::Vec2;

use super::bounds::Bounds;
use super::grid::SpatialHashGrid;
use super::particle::Particle;
use crate::consts::COINCIDENT_EPSILON;
use crate::error::SimError;
use crate::settings::{CorrectionMode, SolverSettings};

/// Verlet particle solver with a spatial hash broad phase
#[derive(Debug, Clone)]
pub struct Solver {
    particles: Vec<Particle>,
    grid: SpatialHashGrid,
    settings: SolverSettings,
}

impl Default for Solver {
    fn default() -> Self {
        let settings = SolverSettings::default();
        Self {
            particles: Vec::new(),
            grid: SpatialHashGrid::new(settings.cell_size),
            settings,
        }
    }
}

impl Solver {
    /// Solver with the reference tuning
    pub fn new() -> Self {
        Self::default()
    }

    /// Solver with custom settings
    pub fn with_settings(settings: SolverSettings) -> Result<Self, SimError> {
        settings.validate()?;
        log::debug!(
            "Solver: gravity={}, dt={}, sub_steps={}, cell_size={}",
            settings.gravity,
            settings.sub_step_dt,
            settings.sub_steps,
            settings.cell_size
        );
        Ok(Self {
            particles: Vec::new(),
            grid: SpatialHashGrid::new(settings.cell_size),
            settings,
        })
    }

    /// Add a particle at rest and return it for further setup
    pub fn add_particle(&mut self, position: Vec2, radius: f32) -> Result<&mut Particle, SimError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SimError::invalid(format!(
                "particle radius must be positive, got {}",
                radius
            )));
        }
        if !position.is_finite() {
            return Err(SimError::invalid(format!(
                "particle position {} is not finite",
                position
            )));
        }
        self.particles.push(Particle::new(position, radius));
        let index = self.particles.len() - 1;
        Ok(&mut self.particles[index])
    }

    /// Advance one frame inside `bounds`
    pub fn update(&mut self, bounds: &Bounds) {
        self.apply_gravity();
        self.rebuild_grid(bounds);

        log::trace!(
            "update: {} particles in {} cells",
            self.particles.len(),
            self.grid.occupied()
        );

        let dt = self.settings.sub_step_dt;
        let damping = self.settings.damping;
        let bounce = self.settings.bounce;
        for _ in 0..self.settings.sub_steps {
            for particle in &mut self.particles {
                particle.resolve_bounds(bounds, bounce);
                particle.integrate(dt, damping);
            }
            self.resolve_collisions(bounds);
        }
    }

    /// Push every particle away from `point` by `strength` (world units/s)
    pub fn repel_from(&mut self, point: Vec2, strength: f32, dt: f32) {
        for particle in &mut self.particles {
            let dir = (particle.position - point).normalize_or_zero();
            particle.add_velocity(dir * strength, dt);
        }
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable handle for velocity nudges and bulk clearing
    #[inline]
    pub fn particles_mut(&mut self) -> &mut Vec<Particle> {
        &mut self.particles
    }

    /// Remove all particles (level reset)
    pub fn clear(&mut self) {
        self.particles.clear();
        self.grid.clear();
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Grid as of the last update
    pub fn grid(&self) -> &SpatialHashGrid {
        &self.grid
    }

    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    fn apply_gravity(&mut self) {
        let gravity = self.settings.gravity;
        for particle in &mut self.particles {
            particle.apply_acceleration(gravity);
        }
    }

    fn rebuild_grid(&mut self, bounds: &Bounds) {
        let origin = bounds.top_left();
        self.grid.clear();
        for (i, particle) in self.particles.iter().enumerate() {
            self.grid.insert(particle.position, i, origin);
        }
    }

    fn resolve_collisions(&mut self, bounds: &Bounds) {
        let origin = bounds.top_left();
        let response = self.settings.collision_response;
        let damping = self.settings.damping;
        let mode = self.settings.correction;
        let Self { particles, grid, .. } = self;

        for (cell, members) in grid.cells() {
            let (cell_min, cell_max) = grid.cell_rect(cell, origin);
            if !bounds.overlaps(cell_min, cell_max) {
                continue;
            }

            for neighbours in grid.neighbours(cell) {
                for &i in members {
                    // `j > i` visits each pair once across mirrored cell offsets
                    for &j in neighbours {
                        if j <= i {
                            continue;
                        }
                        separate(particles, i, j, response, damping, mode);
                    }
                }
            }
        }
    }
}

/// Push an overlapping pair apart symmetrically. Requires `i < j`.
fn separate(
    particles: &mut [Particle],
    i: usize,
    j: usize,
    response: f32,
    damping: f32,
    mode: CorrectionMode,
) {
    let (head, tail) = particles.split_at_mut(j);
    let a = &mut head[i];
    let b = &mut tail[0];

    let v = a.position - b.position;
    let dist = v.length();
    let min_dist = a.radius() + b.radius();
    if dist >= min_dist {
        return;
    }

    let n = if dist > COINCIDENT_EPSILON { v / dist } else { Vec2::X };
    let delta = response * (min_dist - dist);
    let push = n * 0.5 * delta;

    match mode {
        CorrectionMode::Positional => {
            // Drop the approaching normal component, then re-anchor the damped
            // velocity at the corrected position. `n` points from b to a.
            let (mut va, mut vb) = (a.velocity(), b.velocity());
            va -= n * va.dot(n).min(0.0);
            vb -= n * vb.dot(n).max(0.0);
            a.position += push;
            b.position -= push;
            a.previous_position = a.position - va * damping;
            b.previous_position = b.position - vb * damping;
        }
        CorrectionMode::Kinetic => {
            a.position += push;
            b.position -= push;
            a.previous_position = a.position - a.velocity() * damping;
            b.previous_position = b.position - b.velocity() * damping;
        }
    }
}
