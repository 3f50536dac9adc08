//! # Simulation Constants
//!
//! Fixed coefficients of the damped-wave update and the start-up values of
//! a fresh session.
//!
//! **CRITICAL:** `DAMPING` and `SMOOTHING_FACTOR` define the reference
//! output. Changing either changes every recorded surface.

// =============================================================================
// UPDATE RULE
// =============================================================================

/// Smallest grid dimension a height field accepts.
pub const MIN_DIMENSION: usize = 5;

/// Multiplicative attenuation applied to every new height.
pub const DAMPING: f64 = 0.96;

/// Weight of the neighbor average relative to the velocity term.
pub const SMOOTHING_FACTOR: f64 = 2.0;

// =============================================================================
// SESSION DEFAULTS
// =============================================================================

/// Default grid dimension.
pub const DEFAULT_DIMENSION: usize = 250;

/// Default tick period in milliseconds.
pub const DEFAULT_TICK_PERIOD_MS: f64 = 60.0;

/// Default mean time between raindrops in milliseconds.
pub const DEFAULT_RAINDROP_PERIOD_MS: f64 = 35.0;

/// Default base peak. Negative so a drop first dents the surface.
pub const DEFAULT_SPLASH_AMPLITUDE: f64 = -3.0;

/// Default jitter applied around the base peak.
pub const DEFAULT_SPLASH_DELTA: f64 = 1.0;

/// Default disturbance width in cells.
pub const DEFAULT_DROP_SIZE: usize = 1;

/// Default seed for the placement stream.
pub const DEFAULT_SEED: u64 = 48339;
