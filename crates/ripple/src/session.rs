//! # Ripple Session
//!
//! One running surface: the field, its scheduler, the raindrop
//! parameters, both random streams and the tick gate.
//!
//! ## Frame Lifecycle
//!
//! ```text
//! host frame (now_ms)
//!   └─ advance(now_ms)
//!        ├─ gate closed      -> None
//!        └─ gate open        -> inject drops, step once -> Some(report)
//!   └─ points() / topology() -> upload
//! ```

use ripple_core::{
    check_width, Disturbance, DropRng, HeightField, Point, RippleConfig, RippleResult, SimulationSeed, StepScheduler,
    TickReport, ARRIVAL_STREAM, PLACEMENT_STREAM,
};
use tracing::{debug, info};

use crate::gate::TickGate;
use crate::stats::SurfaceStats;

/// A running ripple simulation.
///
/// ## Usage
///
/// ```rust,ignore
/// let mut session = RippleSession::new(&RippleConfig::default())?;
/// session.start(clock.now_ms());
///
/// loop {
///     if session.advance(clock.now_ms())?.is_some() {
///         upload(session.points());
///     }
/// }
/// ```
#[derive(Clone, Debug)]
pub struct RippleSession {
    field: HeightField,
    scheduler: StepScheduler,
    splash: Disturbance,
    seed: SimulationSeed,
    placement: DropRng,
    arrivals: DropRng,
    gate: TickGate,
    running: bool,
}

impl RippleSession {
    /// Builds a stopped session from a configuration.
    ///
    /// # Errors
    ///
    /// Returns the first validation error of `config`.
    pub fn new(config: &RippleConfig) -> RippleResult<Self> {
        config.validate()?;

        let scheduler = config.scheduler()?;
        let seed = config.seed();

        Ok(Self {
            field: config.height_field()?,
            scheduler,
            splash: config.splash,
            seed,
            placement: DropRng::new(seed.derive(PLACEMENT_STREAM)),
            arrivals: DropRng::new(seed.derive(ARRIVAL_STREAM)),
            gate: TickGate::new(scheduler.tick_period_ms())?,
            running: false,
        })
    }

    /// Flattens the surface and starts ticking from `now_ms`.
    ///
    /// Random streams keep their position; use [`RippleSession::reseed`]
    /// to replay from the beginning.
    pub fn start(&mut self, now_ms: f64) {
        self.field.flatten();
        self.gate.reset(now_ms);
        self.running = true;

        info!(
            dimension = self.field.dimension(),
            tick_period_ms = self.scheduler.tick_period_ms(),
            raindrop_period_ms = self.scheduler.mean_period_ms(),
            "session started"
        );
    }

    /// Stops ticking. The surface is kept as is.
    pub fn stop(&mut self) {
        self.running = false;
        debug!(step = self.field.step_count(), "session stopped");
    }

    /// Returns true between `start` and `stop`.
    #[inline]
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Runs a tick if the session is running and one is due at `now_ms`.
    ///
    /// # Errors
    ///
    /// Propagates scheduler errors.
    pub fn advance(&mut self, now_ms: f64) -> RippleResult<Option<TickReport>> {
        if !self.running || !self.gate.poll(now_ms) {
            return Ok(None);
        }
        self.tick().map(Some)
    }

    /// Runs one tick immediately, ignoring the gate.
    ///
    /// # Errors
    ///
    /// Propagates scheduler errors.
    pub fn tick(&mut self) -> RippleResult<TickReport> {
        self.scheduler
            .tick(&mut self.field, &self.splash, &mut self.placement, &mut self.arrivals)
    }

    /// Restarts both random streams from `seed`.
    pub fn reseed(&mut self, seed: SimulationSeed) {
        self.seed = seed;
        self.placement = DropRng::new(seed.derive(PLACEMENT_STREAM));
        self.arrivals = DropRng::new(seed.derive(ARRIVAL_STREAM));
    }

    /// Replaces the raindrop parameters.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeakWidth` and keeps the old parameters if the width
    /// does not fit the field.
    pub fn set_splash(&mut self, splash: Disturbance) -> RippleResult<()> {
        check_width(splash.width, self.field.dimension())?;
        self.splash = splash;
        Ok(())
    }

    /// Changes the mean time between raindrops.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` if `period_ms` is not finite and positive.
    pub fn set_raindrop_period_ms(&mut self, period_ms: f64) -> RippleResult<()> {
        self.scheduler.set_mean_period_ms(period_ms)
    }

    /// Changes the raindrop rate in drops per second.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` if the rate is not finite and positive.
    pub fn set_raindrop_rate(&mut self, drops_per_second: f64) -> RippleResult<()> {
        self.scheduler
            .set_mean_period_ms(ripple_core::rate_to_period_ms(drops_per_second))
    }

    /// The visible grid. Re-fetch after every tick.
    #[inline]
    #[must_use]
    pub fn points(&self) -> &[Point] {
        self.field.current_points()
    }

    /// The fixed triangle index list.
    #[inline]
    #[must_use]
    pub fn topology(&self) -> &[u32] {
        self.field.topology()
    }

    /// The underlying field.
    #[inline]
    #[must_use]
    pub const fn field(&self) -> &HeightField {
        &self.field
    }

    /// The active scheduler.
    #[inline]
    #[must_use]
    pub const fn scheduler(&self) -> &StepScheduler {
        &self.scheduler
    }

    /// The active raindrop parameters.
    #[inline]
    #[must_use]
    pub const fn splash(&self) -> &Disturbance {
        &self.splash
    }

    /// The root seed of the random streams.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> SimulationSeed {
        self.seed
    }

    /// The tick gate.
    #[inline]
    #[must_use]
    pub const fn gate(&self) -> &TickGate {
        &self.gate
    }

    /// Statistics of the visible grid.
    #[must_use]
    pub fn surface_stats(&self) -> SurfaceStats {
        SurfaceStats::of(self.points())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripple_core::{GridConfig, RippleError};

    fn small_config() -> RippleConfig {
        RippleConfig {
            grid: GridConfig { dimension: 20 },
            ..RippleConfig::default()
        }
    }

    #[test]
    fn test_not_running_never_ticks() {
        let mut session = RippleSession::new(&small_config()).unwrap();
        assert!(!session.is_running());
        assert_eq!(session.advance(1_000.0).unwrap(), None);
        assert_eq!(session.field().step_count(), 0);
    }

    #[test]
    fn test_advance_follows_gate() {
        let mut session = RippleSession::new(&small_config()).unwrap();
        session.start(0.0);
        assert_eq!(session.advance(30.0).unwrap(), None);
        let report = session.advance(61.0).unwrap().unwrap();
        assert_eq!(report.step, 1);
        assert_eq!(session.advance(100.0).unwrap(), None);
        assert!(session.advance(122.0).unwrap().is_some());
        assert_eq!(session.gate().stats().ticks, 2);
    }

    #[test]
    fn test_start_flattens() {
        let mut session = RippleSession::new(&small_config()).unwrap();
        session.start(0.0);
        for _ in 0..10 {
            session.tick().unwrap();
        }
        assert!(!session.surface_stats().is_flat());
        session.stop();
        session.start(0.0);
        assert!(session.surface_stats().is_flat());
        assert_eq!(session.field().step_count(), 0);
    }

    #[test]
    fn test_set_splash_validates() {
        let mut session = RippleSession::new(&small_config()).unwrap();
        let err = session.set_splash(Disturbance::new(-3.0, 1.0, 11)).unwrap_err();
        assert_eq!(err, RippleError::InvalidPeakWidth { width: 11, max: 10 });
        assert_eq!(session.splash().width, 1);
        session.set_splash(Disturbance::new(-6.0, 0.0, 3)).unwrap();
        assert_eq!(session.splash().width, 3);
    }

    #[test]
    fn test_rate_setter() {
        let mut session = RippleSession::new(&small_config()).unwrap();
        session.set_raindrop_rate(50.0).unwrap();
        assert_eq!(session.scheduler().mean_period_ms(), 20.0);
        assert!(session.set_raindrop_period_ms(-5.0).is_err());
        assert_eq!(session.scheduler().mean_period_ms(), 20.0);
    }
}
