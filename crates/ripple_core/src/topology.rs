//! # Triangle Topology
//!
//! Index buffer for a square grid, computed from `(row, col)` alone.
//!
//! ```text
//!   idx-d-1 ─── idx-d
//!      │ ╲        │
//!      │   ╲  T1  │
//!      │ T2  ╲    │
//!   idx-1 ───── idx
//! ```
//!
//! Every cell with `row > 0 && col > 0` closes a quad with its up-left
//! neighbors; the quad is emitted as the two triangles above.

/// Number of indices in the topology of a `dimension × dimension` grid.
#[inline]
#[must_use]
pub const fn index_count(dimension: usize) -> usize {
    let quads = dimension.saturating_sub(1);
    quads * quads * 6
}

/// Builds the triangle index list for a `dimension × dimension` grid.
///
/// Indices are row-major (`row * dimension + col`), grouped in triples.
#[must_use]
pub fn build_topology(dimension: usize) -> Vec<u32> {
    let mut indices = Vec::with_capacity(index_count(dimension));

    for row in 1..dimension {
        for col in 1..dimension {
            let idx = (row * dimension + col) as u32;
            let d = dimension as u32;

            // Triangle 1
            indices.extend_from_slice(&[idx - d - 1, idx, idx - d]);
            // Triangle 2
            indices.extend_from_slice(&[idx - d - 1, idx - 1, idx]);
        }
    }

    indices
}
