//! # Double-Buffered Height Field
//!
//! Two grids, one role flag, zero copies.
//!
//! ## Architecture
//!
//! ```text
//!                    ┌─────────────────────────────┐
//!                    │         HeightField         │
//!                    │                             │
//!                    │  ┌─────────┐  ┌─────────┐  │
//!                    │  │ Grid A  │  │ Grid B  │  │
//!                    │  └────┬────┘  └────┬────┘  │
//!                    │       │            │       │
//!                    │  ┌────┴────────────┴────┐  │
//!                    │  │  Current Index (0/1) │  │
//!                    │  └──────────────────────┘  │
//!                    └─────────────────────────────┘
//! ```
//!
//! ## Velocity Substitution
//!
//! There is no velocity field. The previous grid's stored height is read
//! back, negated, as the velocity of the next step:
//!
//! ```text
//! Step N:
//!   read  current[cell]'s neighbors   -> smoothed
//!   read  previous[cell]              -> velocity = -height
//!   write previous[cell] = (2 * smoothed + velocity) * 0.96
//!   SWAP (flag flip)
//! ```
//!
//! Disturbances land in the previous grid, so a raindrop enters the
//! simulation as initial velocity rather than initial displacement.

use tracing::{debug, trace};

use crate::constants::{DAMPING, MIN_DIMENSION, SMOOTHING_FACTOR};
use crate::disturbance::{check_width, fit_origin, Disturbance, DisturbanceSite};
use crate::error::{RippleError, RippleResult};
use crate::point::Point;
use crate::random::UniformSource;
use crate::topology::build_topology;

/// Identity of one of the two grid buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridBuffer {
    /// First buffer. Previous after construction or flatten.
    A,
    /// Second buffer. Current after construction or flatten.
    B,
}

impl GridBuffer {
    #[inline]
    const fn from_index(index: usize) -> Self {
        if index == 0 {
            Self::A
        } else {
            Self::B
        }
    }
}

/// Index of the buffer that is current after construction or flatten.
const INITIAL_CURRENT: usize = 1;

/// Rippling surface simulated as a damped-wave height field.
///
/// ## Usage
///
/// ```rust,ignore
/// let mut field = HeightField::new(50)?;
/// let mut rng = DropRng::new(SimulationSeed::new(42));
///
/// loop {
///     field.inject_disturbance(&Disturbance::new(-3.0, 1.0, 1), &mut rng)?;
///     field.step();
///
///     // Re-fetch after every step: the roles have swapped
///     upload(field.current_points(), field.topology());
/// }
/// ```
#[derive(Clone, Debug)]
pub struct HeightField {
    dimension: usize,

    /// The two grid buffers, A at 0 and B at 1.
    grids: [Vec<Point>; 2],

    /// Index of the current buffer. Previous is always `current ^ 1`.
    current: usize,

    /// Fixed triangle index list.
    topology: Vec<u32>,

    /// Steps since construction or the last flatten.
    step_count: u64,
}

impl HeightField {
    /// Creates a flat field of `dimension × dimension` points.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimension` if `dimension < MIN_DIMENSION`.
    pub fn new(dimension: usize) -> RippleResult<Self> {
        if dimension < MIN_DIMENSION {
            return Err(RippleError::InvalidDimension {
                dimension,
                min: MIN_DIMENSION,
            });
        }

        let mut grid_a = Vec::with_capacity(dimension * dimension);
        for row in 0..dimension {
            for col in 0..dimension {
                grid_a.push(Point::at(row, col));
            }
        }
        let grid_b = grid_a.clone();
        let topology = build_topology(dimension);

        debug!(
            dimension,
            points = grid_a.len(),
            indices = topology.len(),
            "height field created"
        );

        Ok(Self {
            dimension,
            grids: [grid_a, grid_b],
            current: INITIAL_CURRENT,
            topology,
            step_count: 0,
        })
    }

    /// Grid side length. X and Z share it.
    #[inline]
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of points in each grid.
    #[inline]
    #[must_use]
    pub const fn point_count(&self) -> usize {
        self.dimension * self.dimension
    }

    /// Linear index of `(row, col)`.
    #[inline]
    #[must_use]
    pub const fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.dimension + col
    }

    /// The visible grid, row-major.
    ///
    /// The borrow must end before the next mutation; re-fetch after every
    /// step since the roles swap.
    #[inline]
    #[must_use]
    pub fn current_points(&self) -> &[Point] {
        &self.grids[self.current]
    }

    /// The non-visible grid, holding the velocity source of the next step.
    #[inline]
    #[must_use]
    pub fn previous_points(&self) -> &[Point] {
        &self.grids[self.current ^ 1]
    }

    /// The visible grid as raw bytes for GPU upload.
    #[inline]
    #[must_use]
    pub fn current_points_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.current_points())
    }

    /// Triangle index list, length `(dimension - 1)² · 6`.
    #[inline]
    #[must_use]
    pub fn topology(&self) -> &[u32] {
        &self.topology
    }

    /// Triangle index list as raw bytes for GPU upload.
    #[inline]
    #[must_use]
    pub fn topology_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.topology)
    }

    /// Which buffer is currently visible.
    #[inline]
    #[must_use]
    pub const fn current_buffer(&self) -> GridBuffer {
        GridBuffer::from_index(self.current)
    }

    /// Which buffer is currently hidden.
    #[inline]
    #[must_use]
    pub const fn previous_buffer(&self) -> GridBuffer {
        GridBuffer::from_index(self.current ^ 1)
    }

    /// Steps since construction or the last flatten.
    #[inline]
    #[must_use]
    pub const fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Height of `(row, col)` in the visible grid.
    #[inline]
    #[must_use]
    pub fn height_at(&self, row: usize, col: usize) -> f64 {
        self.current_points()[self.index_of(row, col)].height
    }

    /// Height of `(row, col)` in the hidden grid.
    #[inline]
    #[must_use]
    pub fn previous_height_at(&self, row: usize, col: usize) -> f64 {
        self.previous_points()[self.index_of(row, col)].height
    }

    /// Drops a randomly placed disturbance into the hidden grid.
    ///
    /// Consumes three draws from `rng`: row, column, jitter.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeakWidth` unless `1 <= width <= dimension / 2`.
    /// Nothing is drawn and nothing changes on error.
    pub fn inject_disturbance<R: UniformSource>(
        &mut self,
        disturbance: &Disturbance,
        rng: &mut R,
    ) -> RippleResult<DisturbanceSite> {
        check_width(disturbance.width, self.dimension)?;

        let site = disturbance.draw_site(self.dimension, rng);
        self.apply_site(&site);
        Ok(site)
    }

    /// Drops a disturbance with its top-left corner at `(row, col)`.
    ///
    /// The block is shifted inside the grid the same way random placement
    /// is; `peak` is truncated toward zero.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeakWidth` unless `1 <= width <= dimension / 2`.
    pub fn inject_disturbance_at(
        &mut self,
        row: usize,
        col: usize,
        peak: f64,
        width: usize,
    ) -> RippleResult<DisturbanceSite> {
        check_width(width, self.dimension)?;

        let site = DisturbanceSite {
            row: fit_origin(row.min(self.dimension - 1), width, self.dimension),
            col: fit_origin(col.min(self.dimension - 1), width, self.dimension),
            width,
            peak: peak.trunc(),
        };
        self.apply_site(&site);
        Ok(site)
    }

    fn apply_site(&mut self, site: &DisturbanceSite) {
        let dimension = self.dimension;
        let previous = &mut self.grids[self.current ^ 1];

        for row in site.row..site.row + site.width {
            let start = row * dimension + site.col;
            for point in &mut previous[start..start + site.width] {
                point.height += site.peak;
            }
        }

        trace!(row = site.row, col = site.col, width = site.width, peak = site.peak, "disturbance");
    }

    /// Zeroes both grids and restores the initial roles.
    pub fn flatten(&mut self) {
        for grid in &mut self.grids {
            for point in grid.iter_mut() {
                point.height = 0.0;
            }
        }
        self.current = INITIAL_CURRENT;
        self.step_count = 0;

        debug!(dimension = self.dimension, "height field flattened");
    }

    /// Advances the surface by one step, then swaps roles.
    ///
    /// Reads neighbors from the current grid and velocity from the previous
    /// grid, writing results into the previous grid. Edge cells average only
    /// their in-bounds neighbors (3 on edges, 2 in corners).
    pub fn step(&mut self) {
        let d = self.dimension;
        let [grid_a, grid_b] = &mut self.grids;
        let (current, previous) = if self.current == 0 {
            (&grid_a[..], &mut grid_b[..])
        } else {
            (&grid_b[..], &mut grid_a[..])
        };

        let mut idx = 0;
        for row in 0..d {
            for col in 0..d {
                let velocity = -previous[idx].height;

                let mut smoothed = 0.0;
                let mut neighbors = 0u32;
                if row > 0 {
                    smoothed += current[idx - d].height;
                    neighbors += 1;
                }
                if row < d - 1 {
                    smoothed += current[idx + d].height;
                    neighbors += 1;
                }
                if col > 0 {
                    smoothed += current[idx - 1].height;
                    neighbors += 1;
                }
                if col < d - 1 {
                    smoothed += current[idx + 1].height;
                    neighbors += 1;
                }
                smoothed /= f64::from(neighbors);

                let new_height = (smoothed * SMOOTHING_FACTOR + velocity) * DAMPING;
                previous[idx].height = new_height;

                idx += 1;
            }
        }

        self.swap_roles();
    }

    #[inline]
    fn swap_roles(&mut self) {
        self.current ^= 1;
        self.step_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedSource;
    use crate::topology::index_count;

    #[test]
    fn test_field_creation() {
        let field = HeightField::new(5).unwrap();
        assert_eq!(field.dimension(), 5);
        assert_eq!(field.current_points().len(), 25);
        assert_eq!(field.previous_points().len(), 25);
        assert_eq!(field.topology().len(), index_count(5));
        assert_eq!(field.current_buffer(), GridBuffer::B);
        assert_eq!(field.previous_buffer(), GridBuffer::A);
        assert_eq!(field.step_count(), 0);
    }

    #[test]
    fn test_point_layout() {
        let field = HeightField::new(6).unwrap();
        let p = field.current_points()[field.index_of(2, 4)];
        assert_eq!(p.to_array(), [4.0, 0.0, 2.0]);
        assert_eq!(field.current_points(), field.previous_points());
    }

    #[test]
    fn test_dimension_too_small() {
        for d in 0..MIN_DIMENSION {
            assert_eq!(
                HeightField::new(d).unwrap_err(),
                RippleError::InvalidDimension { dimension: d, min: MIN_DIMENSION }
            );
        }
    }

    #[test]
    fn test_inject_writes_previous_only() {
        let mut field = HeightField::new(8).unwrap();
        let site = field.inject_disturbance_at(3, 3, 5.7, 2).unwrap();
        assert_eq!(site.peak, 5.0);
        assert_eq!(field.previous_height_at(3, 3), 5.0);
        assert_eq!(field.previous_height_at(4, 4), 5.0);
        assert_eq!(field.previous_height_at(5, 5), 0.0);
        assert!(field.current_points().iter().all(|p| p.height == 0.0));
    }

    #[test]
    fn test_inject_accumulates() {
        let mut field = HeightField::new(8).unwrap();
        field.inject_disturbance_at(0, 0, -3.0, 1).unwrap();
        field.inject_disturbance_at(0, 0, -3.0, 1).unwrap();
        assert_eq!(field.previous_height_at(0, 0), -6.0);
    }

    #[test]
    fn test_inject_random_uses_script() {
        let mut field = HeightField::new(5).unwrap();
        // 0.5 * 4 = 2 on both axes
        let mut rng = ScriptedSource::new(vec![0.5, 0.5, 0.0]);
        let site = field.inject_disturbance(&Disturbance::new(10.0, 0.0, 1), &mut rng).unwrap();
        assert_eq!((site.row, site.col), (2, 2));
        assert_eq!(field.previous_height_at(2, 2), 10.0);
    }

    #[test]
    fn test_inject_bad_width_consumes_nothing() {
        let mut field = HeightField::new(6).unwrap();
        let mut rng = ScriptedSource::new(vec![0.3]);
        let err = field.inject_disturbance(&Disturbance::new(1.0, 0.0, 4), &mut rng);
        assert_eq!(err, Err(RippleError::InvalidPeakWidth { width: 4, max: 3 }));
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_step_swaps_roles() {
        let mut field = HeightField::new(5).unwrap();
        let before = field.previous_buffer();
        field.step();
        assert_eq!(field.current_buffer(), before);
        field.step();
        assert_eq!(field.current_buffer(), GridBuffer::B);
        assert_eq!(field.step_count(), 2);
    }

    #[test]
    fn test_corner_averages_two_neighbors() {
        let mut field = HeightField::new(5).unwrap();
        // Put height into the current grid by stepping a disturbance through.
        field.inject_disturbance_at(0, 1, 10.0, 1).unwrap();
        field.step();
        // current (0,1) = -9.6; corner (0,0) sees neighbors (1,0)=0 and (0,1)=-9.6
        field.step();
        let expected = (-9.6 / 2.0 * SMOOTHING_FACTOR) * DAMPING;
        assert!((field.height_at(0, 0) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_flatten_restores_roles() {
        let mut field = HeightField::new(6).unwrap();
        field.inject_disturbance_at(1, 1, 4.0, 2).unwrap();
        field.step();
        field.flatten();
        assert_eq!(field.current_buffer(), GridBuffer::B);
        assert_eq!(field.step_count(), 0);
        assert!(field.current_points().iter().all(|p| p.height == 0.0));
        assert!(field.previous_points().iter().all(|p| p.height == 0.0));
    }

    #[test]
    fn test_bytes_views() {
        let field = HeightField::new(5).unwrap();
        assert_eq!(field.current_points_bytes().len(), 25 * Point::SIZE);
        assert_eq!(field.topology_bytes().len(), index_count(5) * 4);
    }
}
