//! Summary statistics of a surface snapshot.

use ripple_core::Point;

/// Height statistics of one grid.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceStats {
    /// Lowest height.
    pub min: f64,
    /// Highest height.
    pub max: f64,
    /// Mean height.
    pub mean: f64,
    /// Sum of squared heights.
    pub energy: f64,
}

impl SurfaceStats {
    /// Computes statistics over `points`. An empty slice yields zeros.
    #[must_use]
    pub fn of(points: &[Point]) -> Self {
        if points.is_empty() {
            return Self::default();
        }

        let mut stats = Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            mean: 0.0,
            energy: 0.0,
        };
        for p in points {
            stats.min = stats.min.min(p.height);
            stats.max = stats.max.max(p.height);
            stats.mean += p.height;
            stats.energy += p.height * p.height;
        }
        stats.mean /= points.len() as f64;
        stats
    }

    /// Largest absolute height.
    #[inline]
    #[must_use]
    pub fn amplitude(&self) -> f64 {
        self.min.abs().max(self.max.abs())
    }

    /// Returns true if every height is exactly zero.
    #[inline]
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.energy == 0.0
    }
}
