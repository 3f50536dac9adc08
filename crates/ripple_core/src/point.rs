//! Grid point records.

use bytemuck::{Pod, Zeroable};

/// One vertex of the surface.
///
/// `x` and `z` are the column and row the point was built at and never
/// change. `height` is the only field the engine mutates.
///
/// Memory layout is `#[repr(C)]` so a grid can be handed to a renderer as
/// raw bytes without copying.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Point {
    /// Column of the point.
    pub x: f64,
    /// Vertical displacement.
    pub height: f64,
    /// Row of the point.
    pub z: f64,
}

impl Point {
    /// Size in bytes.
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Creates a flat point at `(row, col)`.
    #[inline]
    #[must_use]
    pub fn at(row: usize, col: usize) -> Self {
        Self {
            x: col as f64,
            height: 0.0,
            z: row as f64,
        }
    }

    /// Returns the point as an `[x, height, z]` triple.
    #[inline]
    #[must_use]
    pub const fn to_array(self) -> [f64; 3] {
        [self.x, self.height, self.z]
    }
}
