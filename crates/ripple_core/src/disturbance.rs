//! # Disturbance Injection
//!
//! A disturbance models a raindrop: a `width × width` block of cells gets a
//! whole-number height offset of `base_peak ± delta`.
//!
//! ## Placement
//!
//! The block's top-left corner is drawn uniformly from
//! `[0, dimension - 1)` on each axis. A block that would hang over the far
//! edge is shifted back inside rather than redrawn, so edge-adjacent draws
//! pile up against the boundary.
//!
//! ## Draw Order
//!
//! Every injection consumes exactly three draws: row, column, jitter.
//! A rejected width consumes none.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DROP_SIZE, DEFAULT_SPLASH_AMPLITUDE, DEFAULT_SPLASH_DELTA};
use crate::error::{RippleError, RippleResult};
use crate::random::UniformSource;

/// Largest disturbance width a field of `dimension` accepts.
#[inline]
#[must_use]
pub const fn max_width(dimension: usize) -> usize {
    dimension / 2
}

/// Checks `1 <= width <= dimension / 2`.
///
/// # Errors
///
/// Returns `InvalidPeakWidth` when the width is out of range.
pub fn check_width(width: usize, dimension: usize) -> RippleResult<()> {
    let max = max_width(dimension);
    if width < 1 || width > max {
        return Err(RippleError::InvalidPeakWidth { width, max });
    }
    Ok(())
}

/// Shifts a block origin so the whole block lies inside the grid.
#[inline]
#[must_use]
pub const fn fit_origin(origin: usize, width: usize, dimension: usize) -> usize {
    if origin + (width - 1) > dimension - 1 {
        dimension - width
    } else {
        origin
    }
}

/// Amplitude parameters of a raindrop.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Disturbance {
    /// Mean peak height. Negative values dent the surface.
    #[serde(rename = "amplitude")]
    pub base_peak: f64,
    /// Maximum jitter added to or subtracted from the base peak.
    pub delta: f64,
    /// Block width in cells.
    #[serde(rename = "drop_size")]
    pub width: usize,
}

impl Disturbance {
    /// Creates a disturbance description.
    #[inline]
    #[must_use]
    pub const fn new(base_peak: f64, delta: f64, width: usize) -> Self {
        Self { base_peak, delta, width }
    }

    /// Jitter actually applied. A zero base peak never jitters.
    #[inline]
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn effective_delta(&self) -> f64 {
        if self.base_peak == 0.0 {
            0.0
        } else {
            self.delta
        }
    }

    /// Draws a concrete site for this disturbance on a `dimension` grid.
    ///
    /// The width must already be validated with [`check_width`].
    pub(crate) fn draw_site<R: UniformSource>(&self, dimension: usize, rng: &mut R) -> DisturbanceSite {
        let span = (dimension - 1) as f64;
        let row = (rng.next_unit() * span) as usize;
        let col = (rng.next_unit() * span) as usize;

        let delta = self.effective_delta();
        let peak_value = self.base_peak + (rng.next_unit() * 2.0 * delta) - delta;

        DisturbanceSite {
            row: fit_origin(row, self.width, dimension),
            col: fit_origin(col, self.width, dimension),
            width: self.width,
            peak: peak_value.trunc(),
        }
    }
}

impl Default for Disturbance {
    fn default() -> Self {
        Self {
            base_peak: DEFAULT_SPLASH_AMPLITUDE,
            delta: DEFAULT_SPLASH_DELTA,
            width: DEFAULT_DROP_SIZE,
        }
    }
}

/// Where and how strongly a disturbance landed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisturbanceSite {
    /// Top row of the block.
    pub row: usize,
    /// Left column of the block.
    pub col: usize,
    /// Block width in cells.
    pub width: usize,
    /// Whole-number offset added to every cell of the block.
    pub peak: f64,
}

impl DisturbanceSite {
    /// Returns true if `(row, col)` lies inside the block.
    #[inline]
    #[must_use]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.row && row < self.row + self.width && col >= self.col && col < self.col + self.width
    }
}
