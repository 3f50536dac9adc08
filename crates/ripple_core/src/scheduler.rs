//! # Step Scheduler
//!
//! Raindrop arrivals sampled at fixed tick granularity.
//!
//! ## Design
//!
//! With a tick period `P` and a mean time between drops `M`, each tick
//! expects `n = P / M` drops. The whole part is injected unconditionally;
//! the fractional part becomes one Bernoulli trial for an extra drop:
//!
//! ```text
//! n = 2.25  ->  2 drops, then a 25% chance of a third
//! ```
//!
//! Every tick must:
//! - Finish all injections before stepping
//! - Step exactly once, whatever `n` is

use tracing::trace;

use crate::disturbance::{check_width, Disturbance};
use crate::error::{RippleError, RippleResult};
use crate::height_field::HeightField;
use crate::random::UniformSource;

/// Outcome of one scheduler tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Drops injected before the step, including the bonus drop.
    pub drops: u32,
    /// Whether the fractional trial produced an extra drop.
    pub bonus_drop: bool,
    /// Field step count after this tick.
    pub step: u64,
}

/// Decides how many disturbances precede each step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepScheduler {
    tick_period_ms: f64,
    mean_period_ms: f64,
}

/// Checks that a period is finite and strictly positive.
///
/// # Errors
///
/// Returns `InvalidPeriod` naming `name` otherwise.
pub fn check_period(name: &'static str, value: f64) -> RippleResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(RippleError::InvalidPeriod { name, value })
    }
}

/// Rejects a raindrop period so short that a tick's whole drop count
/// would not fit in a `u32`.
fn check_ratio(tick_period_ms: f64, mean_period_ms: f64) -> RippleResult<f64> {
    if tick_period_ms / mean_period_ms > f64::from(u32::MAX) {
        return Err(RippleError::InvalidPeriod {
            name: "raindrop_period_ms",
            value: mean_period_ms,
        });
    }
    Ok(mean_period_ms)
}

impl StepScheduler {
    /// Creates a scheduler.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` if either period is not finite and positive,
    /// or if more than `u32::MAX` drops would be due per tick.
    pub fn new(tick_period_ms: f64, mean_period_ms: f64) -> RippleResult<Self> {
        let tick_period_ms = check_period("tick_period_ms", tick_period_ms)?;
        let mean_period_ms = check_period("raindrop_period_ms", mean_period_ms)?;
        Ok(Self {
            tick_period_ms,
            mean_period_ms: check_ratio(tick_period_ms, mean_period_ms)?,
        })
    }

    /// Creates a scheduler from a drop rate in drops per second.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` if the tick period or the rate is not
    /// finite and positive.
    pub fn from_rate(tick_period_ms: f64, drops_per_second: f64) -> RippleResult<Self> {
        Self::new(tick_period_ms, rate_to_period_ms(drops_per_second))
    }

    /// Fixed tick period in milliseconds.
    #[inline]
    #[must_use]
    pub const fn tick_period_ms(&self) -> f64 {
        self.tick_period_ms
    }

    /// Mean time between drops in milliseconds.
    #[inline]
    #[must_use]
    pub const fn mean_period_ms(&self) -> f64 {
        self.mean_period_ms
    }

    /// Changes the mean time between drops.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` and keeps the old value if `period_ms` is
    /// not finite and positive, or too short for the tick period.
    pub fn set_mean_period_ms(&mut self, period_ms: f64) -> RippleResult<()> {
        let period_ms = check_period("raindrop_period_ms", period_ms)?;
        self.mean_period_ms = check_ratio(self.tick_period_ms, period_ms)?;
        Ok(())
    }

    /// Expected drops per tick, `P / M`.
    #[inline]
    #[must_use]
    pub fn drops_per_tick(&self) -> f64 {
        self.tick_period_ms / self.mean_period_ms
    }

    /// Splits the expected drops into a guaranteed count and the
    /// probability of one more.
    #[must_use]
    pub fn split_drops(&self) -> (u32, f64) {
        let n = self.drops_per_tick();
        let whole = n.trunc();
        (whole as u32, n - whole)
    }

    /// Runs one tick: inject the scheduled drops, then step once.
    ///
    /// `placement` feeds drop locations and jitter; `arrivals` feeds the
    /// fractional trial and is only drawn from when the fraction is
    /// non-zero.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeakWidth` before touching the field if the
    /// disturbance width does not fit it.
    pub fn tick<P, A>(
        &self,
        field: &mut HeightField,
        disturbance: &Disturbance,
        placement: &mut P,
        arrivals: &mut A,
    ) -> RippleResult<TickReport>
    where
        P: UniformSource,
        A: UniformSource,
    {
        check_width(disturbance.width, field.dimension())?;

        let (whole, chance) = self.split_drops();
        let mut drops = 0;
        for _ in 0..whole {
            field.inject_disturbance(disturbance, placement)?;
            drops += 1;
        }

        let bonus_drop = chance > 0.0 && arrivals.next_unit() <= chance;
        if bonus_drop {
            field.inject_disturbance(disturbance, placement)?;
            drops += 1;
        }

        field.step();

        trace!(drops, bonus_drop, step = field.step_count(), "tick");

        Ok(TickReport {
            drops,
            bonus_drop,
            step: field.step_count(),
        })
    }
}

/// Converts a drop rate (drops per second) into a mean period in ms.
#[inline]
#[must_use]
pub fn rate_to_period_ms(drops_per_second: f64) -> f64 {
    1000.0 / drops_per_second
}
