//! # Tick Gate
//!
//! Decides when a simulation tick is due from host-supplied time.
//!
//! ## Design
//!
//! The host owns the clock; the gate only sees monotonic milliseconds.
//! A tick fires when strictly more than one period has elapsed since the
//! last one. Missed periods are not replayed: a slow frame yields one
//! tick, marked late.

use ripple_core::{check_period, RippleResult};
use tracing::warn;

/// Tick timing statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GateStats {
    /// Ticks fired.
    pub ticks: u64,
    /// Ticks fired more than two periods after the previous one.
    pub late_ticks: u64,
    /// Largest gap observed between two ticks, in milliseconds.
    pub max_gap_ms: f64,
}

/// Fixed-period tick gate driven by host time.
#[derive(Clone, Debug)]
pub struct TickGate {
    period_ms: f64,
    last_ms: f64,
    stats: GateStats,
}

impl TickGate {
    /// Creates a gate whose origin is `0 ms`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` if `period_ms` is not finite and positive.
    pub fn new(period_ms: f64) -> RippleResult<Self> {
        Ok(Self {
            period_ms: check_period("tick_period_ms", period_ms)?,
            last_ms: 0.0,
            stats: GateStats::default(),
        })
    }

    /// Restarts the gate at `origin_ms` and clears statistics.
    pub fn reset(&mut self, origin_ms: f64) {
        self.last_ms = origin_ms;
        self.stats = GateStats::default();
    }

    /// Returns true and records the tick if one is due at `now_ms`.
    pub fn poll(&mut self, now_ms: f64) -> bool {
        let gap = now_ms - self.last_ms;
        if gap <= self.period_ms {
            return false;
        }

        self.stats.ticks += 1;
        self.stats.max_gap_ms = self.stats.max_gap_ms.max(gap);
        if gap > 2.0 * self.period_ms {
            self.stats.late_ticks += 1;
            warn!(gap_ms = gap, period_ms = self.period_ms, "tick late");
        }

        self.last_ms = now_ms;
        true
    }

    /// Target tick period in milliseconds.
    #[inline]
    #[must_use]
    pub const fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Time of the last tick (or the origin) in milliseconds.
    #[inline]
    #[must_use]
    pub const fn last_ms(&self) -> f64 {
        self.last_ms
    }

    /// Returns tick statistics.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> &GateStats {
        &self.stats
    }
}
