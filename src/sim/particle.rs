//! Verlet particle
//!
//! Velocity is never stored: it is the difference between the current and the
//! previous position. Setting or adding velocity moves `previous_position`.

use glam::Vec2;

use crate::consts::BOUNCE;

use super::bounds::Bounds;

/// A circular particle integrated with position Verlet
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Current position (world units)
    pub position: Vec2,
    /// Position one integration step ago
    pub previous_position: Vec2,
    /// Accumulated acceleration, cleared by `integrate`
    pub acceleration: Vec2,
    radius: f32,
}

impl Particle {
    /// Create a particle at rest. Callers guarantee `radius > 0`.
    pub fn new(position: Vec2, radius: f32) -> Self {
        debug_assert!(radius > 0.0);
        Self {
            position,
            previous_position: position,
            acceleration: Vec2::ZERO,
            radius,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn apply_acceleration(&mut self, a: Vec2) {
        self.acceleration += a;
    }

    /// Replace the implicit velocity
    pub fn set_velocity(&mut self, v: Vec2, dt: f32) {
        self.previous_position = self.position - v * dt;
    }

    /// Add to the implicit velocity
    pub fn add_velocity(&mut self, v: Vec2, dt: f32) {
        self.previous_position -= v * dt;
    }

    /// Displacement over the last step (not scaled by dt)
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.position - self.previous_position
    }

    /// Position Verlet with velocity damping folded into the displacement
    pub fn integrate(&mut self, dt: f32, damping: f32) {
        let displacement = self.velocity() * damping;
        self.previous_position = self.position;
        self.position += displacement + self.acceleration * (dt * dt);
        self.acceleration = Vec2::ZERO;
    }

    /// Keep the circle inside the bounds with the default bounce factor
    pub fn solve_bounds(&mut self, bounds: &Bounds) {
        self.resolve_bounds(bounds, BOUNCE);
    }

    /// Clamp against each interior edge independently, reflecting the
    /// implicit velocity on the clamped axis scaled by `bounce`.
    pub fn resolve_bounds(&mut self, bounds: &Bounds, bounce: f32) {
        let min = bounds.interior_min();
        let max = bounds.interior_max();
        let r = self.radius;

        if self.position.x - r < min.x {
            self.position.x = min.x + r;
            self.previous_position.x =
                self.position.x + (self.previous_position.x - self.position.x) * -bounce;
        }
        if self.position.x + r > max.x {
            self.position.x = max.x - r;
            self.previous_position.x =
                self.position.x + (self.previous_position.x - self.position.x) * -bounce;
        }
        if self.position.y - r < min.y {
            self.position.y = min.y + r;
            self.previous_position.y =
                self.position.y + (self.previous_position.y - self.position.y) * -bounce;
        }
        if self.position.y + r > max.y {
            self.position.y = max.y - r;
            self.previous_position.y =
                self.position.y + (self.previous_position.y - self.position.y) * -bounce;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Bounds {
        Bounds::from_center_size(Vec2::new(50.0, 50.0), Vec2::splat(100.0)).unwrap()
    }

    #[test]
    fn test_new_is_at_rest() {
        let p = Particle::new(Vec2::new(3.0, 4.0), 2.0);
        assert_eq!(p.velocity(), Vec2::ZERO);
        assert_eq!(p.acceleration, Vec2::ZERO);
        assert_eq!(p.radius(), 2.0);
    }

    #[test]
    fn test_set_velocity_roundtrip() {
        let mut p = Particle::new(Vec2::new(10.0, 10.0), 1.0);
        p.add_velocity(Vec2::new(5.0, 5.0), 1.0);
        p.set_velocity(Vec2::new(60.0, -30.0), 0.5);
        assert!((p.velocity() - Vec2::new(30.0, -15.0)).length() < 0.0001);
    }

    #[test]
    fn test_add_velocity_accumulates() {
        let mut p = Particle::new(Vec2::ZERO, 1.0);
        p.add_velocity(Vec2::new(1.0, 0.0), 2.0);
        p.add_velocity(Vec2::new(0.0, 3.0), 1.0);
        assert!((p.velocity() - Vec2::new(2.0, 3.0)).length() < 0.0001);
    }

    #[test]
    fn test_integrate_applies_damping_and_acceleration() {
        let mut p = Particle::new(Vec2::ZERO, 1.0);
        p.set_velocity(Vec2::new(10.0, 0.0), 1.0);
        p.apply_acceleration(Vec2::new(0.0, 100.0));
        p.apply_acceleration(Vec2::new(0.0, 100.0));
        p.integrate(0.1, 0.99);

        assert!((p.position.x - 9.9).abs() < 0.0001);
        assert!((p.position.y - 2.0).abs() < 0.0001);
        assert_eq!(p.previous_position, Vec2::ZERO);
        assert_eq!(p.acceleration, Vec2::ZERO);
    }

    #[test]
    fn test_bounds_clamp_left_edge_bounces() {
        let mut p = Particle::new(Vec2::new(2.0, 50.0), 5.0);
        p.previous_position = Vec2::new(6.0, 50.0); // moving left by 4
        p.resolve_bounds(&arena(), 0.95);

        assert!((p.position.x - 5.0).abs() < 0.0001);
        // Reflected about the corrected position: velocity +4 * 0.95
        assert!((p.velocity().x - 0.95).abs() < 0.0001);
    }

    #[test]
    fn test_bounds_corner_clamps_both_axes() {
        let mut p = Particle::new(Vec2::new(99.0, 99.0), 3.0);
        p.resolve_bounds(&arena(), 0.95);
        assert!((p.position.x - 97.0).abs() < 0.0001);
        assert!((p.position.y - 97.0).abs() < 0.0001);
    }

    #[test]
    fn test_bounds_respects_outline() {
        let bounds = Bounds::new(Vec2::new(50.0, 50.0), Vec2::splat(100.0), 5.0).unwrap();
        let mut p = Particle::new(Vec2::new(50.0, 98.0), 2.0);
        p.solve_bounds(&bounds);
        assert!((p.position.y - 93.0).abs() < 0.0001);
    }

    #[test]
    fn test_inside_bounds_untouched() {
        let mut p = Particle::new(Vec2::new(50.0, 50.0), 5.0);
        p.previous_position = Vec2::new(49.0, 51.0);
        let before = p.clone();
        p.resolve_bounds(&arena(), 0.95);
        assert_eq!(p, before);
    }
}
