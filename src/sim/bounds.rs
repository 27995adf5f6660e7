//! Rectangular arena description
//!
//! The arena is a center + size rectangle with an optional outline. The outline
//! is an inward margin: particles are clamped to the rectangle inset by the
//! outline thickness on every side.

use glam::Vec2;

use crate::error::SimError;

/// Axis-aligned arena rectangle consumed by the solver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    center: Vec2,
    size: Vec2,
    outline: f32,
}

impl Bounds {
    /// Create bounds, rejecting empty or non-finite rectangles
    pub fn new(center: Vec2, size: Vec2, outline: f32) -> Result<Self, SimError> {
        if !center.is_finite() {
            return Err(SimError::invalid(format!("bounds center {} is not finite", center)));
        }
        if !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
            return Err(SimError::invalid(format!(
                "bounds size must be positive, got {}x{}",
                size.x, size.y
            )));
        }
        if !outline.is_finite() || outline < 0.0 {
            return Err(SimError::invalid(format!(
                "outline thickness must be non-negative, got {}",
                outline
            )));
        }
        if outline * 2.0 >= size.x.min(size.y) {
            return Err(SimError::invalid(format!(
                "outline {} leaves no interior in a {}x{} arena",
                outline, size.x, size.y
            )));
        }
        Ok(Self {
            center,
            size,
            outline,
        })
    }

    /// Bounds without an outline
    pub fn from_center_size(center: Vec2, size: Vec2) -> Result<Self, SimError> {
        Self::new(center, size, 0.0)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.center
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn outline(&self) -> f32 {
        self.outline
    }

    /// Top-left corner of the nominal rectangle (grid origin)
    #[inline]
    pub fn top_left(&self) -> Vec2 {
        self.center - self.size * 0.5
    }

    /// Bottom-right corner of the nominal rectangle
    #[inline]
    pub fn bottom_right(&self) -> Vec2 {
        self.center + self.size * 0.5
    }

    /// Minimum corner of the playable interior
    #[inline]
    pub fn interior_min(&self) -> Vec2 {
        self.top_left() + Vec2::splat(self.outline)
    }

    /// Maximum corner of the playable interior
    #[inline]
    pub fn interior_max(&self) -> Vec2 {
        self.bottom_right() - Vec2::splat(self.outline)
    }

    /// Whether the box `[min, max]` touches the nominal rectangle
    pub fn overlaps(&self, min: Vec2, max: Vec2) -> bool {
        let tl = self.top_left();
        let br = self.bottom_right();
        !(max.x < tl.x || min.x > br.x || max.y < tl.y || min.y > br.y)
    }
}
