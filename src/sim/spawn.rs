//! Seeded particle spawning
//!
//! Level builders drop small clusters of particles on spawn points. Offsets are
//! whole world units in `[-SPAWN_JITTER, SPAWN_JITTER)` so clusters start
//! overlapping and settle under the solver.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::solver::Solver;
use crate::consts::SPAWN_JITTER;
use crate::error::SimError;

/// Seeded scatterer for particle clusters
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Random whole-unit offset on each axis
    fn jitter(&mut self) -> Vec2 {
        Vec2::new(
            self.rng.random_range(-SPAWN_JITTER..SPAWN_JITTER) as f32,
            self.rng.random_range(-SPAWN_JITTER..SPAWN_JITTER) as f32,
        )
    }

    /// Add `count` particles around `center`, returning how many were added
    pub fn scatter(
        &mut self,
        solver: &mut Solver,
        center: Vec2,
        count: usize,
        radius: f32,
    ) -> Result<usize, SimError> {
        for _ in 0..count {
            let offset = self.jitter();
            solver.add_particle(center + offset, radius)?;
        }
        Ok(count)
    }

    /// Scatter `per_cell` particles on every spawn point
    pub fn scatter_cells(
        &mut self,
        solver: &mut Solver,
        centers: &[Vec2],
        per_cell: usize,
        radius: f32,
    ) -> Result<usize, SimError> {
        let mut added = 0;
        for &center in centers {
            added += self.scatter(solver, center, per_cell, radius)?;
        }
        log::debug!("Spawned {} particles on {} cells", added, centers.len());
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{PARTICLE_RADIUS, PARTICLES_PER_CELL};

    #[test]
    fn test_scatter_stays_within_jitter() {
        let mut solver = Solver::new();
        let mut spawner = Spawner::new(42);
        let center = Vec2::new(200.0, 200.0);
        let added = spawner.scatter(&mut solver, center, 50, PARTICLE_RADIUS).unwrap();
        assert_eq!(added, 50);
        for p in solver.particles() {
            let d = p.position - center;
            assert!(d.x >= -8.0 && d.x < 8.0);
            assert!(d.y >= -8.0 && d.y < 8.0);
            assert_eq!(d.x.fract(), 0.0);
            assert_eq!(p.radius(), PARTICLE_RADIUS);
        }
    }

    #[test]
    fn test_same_seed_same_layout() {
        let centers = [Vec2::new(30.0, 30.0), Vec2::new(90.0, 30.0)];
        let mut a = Solver::new();
        let mut b = Solver::new();
        Spawner::new(7).scatter_cells(&mut a, &centers, PARTICLES_PER_CELL, 7.0).unwrap();
        Spawner::new(7).scatter_cells(&mut b, &centers, PARTICLES_PER_CELL, 7.0).unwrap();
        assert_eq!(a.particles(), b.particles());
        assert_eq!(a.len(), 6);
    }

    #[test]
    fn test_scatter_propagates_bad_radius() {
        let mut solver = Solver::new();
        let result = Spawner::new(1).scatter(&mut solver, Vec2::ZERO, 3, 0.0);
        assert!(matches!(result, Err(SimError::InvalidConfiguration(_))));
        assert!(solver.is_empty());
    }
}
