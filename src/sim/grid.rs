//! Uniform spatial hash grid
//!
//! Broad phase for pairwise collisions. Cells are keyed by their integer
//! coordinates packed into a `u64`; each cell holds the indices of the
//! particles that were inside it when the grid was last rebuilt.
//!
//! The grid is a snapshot: it is cleared and refilled once per solver update
//! and never patched incrementally, so indices are only meaningful against the
//! particle slice it was built from.

use std::collections::HashMap;

use glam::{IVec2, Vec2};

use super::bounds::Bounds;

/// Packed cell coordinate
pub type CellKey = u64;

/// Pack a cell coordinate into a key.
///
/// Each coordinate is reinterpreted as its `u32` bit pattern (no sign
/// extension), so every `(x, y)` pair, negative ones included, maps to a
/// distinct key.
#[inline]
pub fn hash(x: i32, y: i32) -> CellKey {
    ((x as u32 as u64) << 32) | (y as u32 as u64)
}

/// Inverse of [`hash`]
#[inline]
pub fn decode(key: CellKey) -> IVec2 {
    IVec2::new((key >> 32) as u32 as i32, key as u32 as i32)
}

/// Spatial hash grid over particle indices
#[derive(Debug, Clone)]
pub struct SpatialHashGrid {
    cell_size: f32,
    cells: HashMap<CellKey, Vec<usize>>,
    /// Occupied keys in first-insert order, for stable iteration
    order: Vec<CellKey>,
    count: usize,
}

impl SpatialHashGrid {
    /// Callers guarantee `cell_size > 0`
    pub fn new(cell_size: f32) -> Self {
        debug_assert!(cell_size > 0.0);
        Self {
            cell_size,
            cells: HashMap::new(),
            order: Vec::new(),
            count: 0,
        }
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell containing `pos`, relative to `origin`
    pub fn world_to_cell(&self, pos: Vec2, origin: Vec2) -> IVec2 {
        let rel = (pos - origin) / self.cell_size;
        IVec2::new(rel.x.floor() as i32, rel.y.floor() as i32)
    }

    /// Append `index` to the cell containing `pos`
    pub fn insert(&mut self, pos: Vec2, index: usize, origin: Vec2) {
        let cell = self.world_to_cell(pos, origin);
        let key = hash(cell.x, cell.y);
        let entries = self.cells.entry(key).or_insert_with(|| {
            self.order.push(key);
            Vec::new()
        });
        entries.push(index);
        self.count += 1;
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.order.clear();
        self.count = 0;
    }

    /// Indices stored in `cell`, if it is occupied
    pub fn get(&self, cell: IVec2) -> Option<&[usize]> {
        self.cells.get(&hash(cell.x, cell.y)).map(Vec::as_slice)
    }

    /// Occupied cells in first-insert order
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, &[usize])> + '_ {
        self.order
            .iter()
            .filter_map(|key| self.cells.get(key).map(|v| (decode(*key), v.as_slice())))
    }

    /// Occupied cells in the 3×3 block around `cell`, itself included
    pub fn neighbours(&self, cell: IVec2) -> impl Iterator<Item = &[usize]> + '_ {
        (-1..=1).flat_map(move |dx| {
            (-1..=1).filter_map(move |dy| self.get(cell + IVec2::new(dx, dy)))
        })
    }

    /// Number of occupied cells
    pub fn occupied(&self) -> usize {
        self.order.len()
    }

    /// Total number of stored indices
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// World-space `(min, max)` of a cell
    pub fn cell_rect(&self, cell: IVec2, origin: Vec2) -> (Vec2, Vec2) {
        let min = origin + cell.as_vec2() * self.cell_size;
        (min, min + Vec2::splat(self.cell_size))
    }

    /// Top-left corners of the cells tiling `bounds`, for a debug overlay.
    ///
    /// Lazy, column by column, so an oversized arena costs nothing until it is
    /// walked.
    pub fn debug_cells(&self, bounds: &Bounds) -> impl Iterator<Item = Vec2> + '_ {
        let origin = bounds.top_left();
        // Float to int casts saturate, so huge counts clamp instead of wrapping
        let cols = (bounds.size().x / self.cell_size).ceil() as usize;
        let rows = (bounds.size().y / self.cell_size).ceil() as usize;

        (0..cols).flat_map(move |x| {
            (0..rows).map(move |y| origin + Vec2::new(x as f32, y as f32) * self.cell_size)
        })
    }
}
