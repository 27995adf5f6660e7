//! Particle simulation module
//!
//! Everything that moves particles lives here. The module is pure:
//! - Fixed sub-step size only
//! - Seeded RNG only
//! - Stable iteration order (particle index, then first-occupied cell)
//! - No rendering or platform dependencies

pub mod bounds;
pub mod grid;
pub mod particle;
pub mod solver;
pub mod spawn;

pub use bounds::Bounds;
pub use grid::{CellKey, SpatialHashGrid, decode, hash};
pub use particle::Particle;
pub use solver::Solver;
pub use spawn::Spawner;
