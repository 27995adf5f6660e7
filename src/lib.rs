//! Verlet Arena - particle physics for rectangular arenas
//!
//! Core modules:
//! - `sim`: Verlet particles, spatial hash grid and the solver
//! - `settings`: Data-driven solver tuning
//! - `error`: Configuration errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use settings::{CorrectionMode, SolverSettings};
pub use sim::{Bounds, Particle, Solver, SpatialHashGrid, Spawner};

/// Simulation constants (reference tuning)
pub mod consts {
    use glam::Vec2;

    /// Fixed sub-step timestep (120 Hz)
    pub const SUB_STEP_DT: f32 = 1.0 / 120.0;
    /// Sub-steps per update call
    pub const SUB_STEPS: u32 = 3;
    /// Downward acceleration, world units/s² (y grows downward)
    pub const GRAVITY: Vec2 = Vec2::new(0.0, 800.0);

    /// Spatial hash cell edge length
    pub const CELL_SIZE: f32 = 45.0;

    /// Velocity kept per integration step
    pub const DAMPING: f32 = 0.99;
    /// Velocity kept after a wall bounce
    pub const BOUNCE: f32 = 0.95;
    /// Share of pair overlap corrected per sub-step
    pub const COLLISION_RESPONSE: f32 = 0.8;
    /// Below this centre distance a pair is treated as coincident
    pub const COINCIDENT_EPSILON: f32 = 0.0001;

    /// Level spawn defaults
    pub const PARTICLE_RADIUS: f32 = 7.0;
    pub const PARTICLES_PER_CELL: usize = 3;
    pub const SPAWN_JITTER: i32 = 8;
}
