//! # Random Sources
//!
//! Caller-owned uniform draws for disturbance placement, amplitude jitter
//! and arrival trials.
//!
//! ## Determinism Guarantee
//!
//! The engine never touches ambient randomness. Given the same
//! `SimulationSeed`, a `DropRng` produces **exactly** the same sequence on
//! any platform, and a session replays bit-identical surfaces.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Stream purpose for disturbance placement and jitter.
pub const PLACEMENT_STREAM: u64 = 0x504C_4143;

/// Stream purpose for the scheduler's arrival trial.
pub const ARRIVAL_STREAM: u64 = 0x4152_5256;

/// Seed for deterministic simulation.
///
/// All random streams of a session derive from this seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SimulationSeed(u64);

impl SimulationSeed {
    /// Creates a new simulation seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives a sub-seed for a specific purpose (e.g., arrivals).
    ///
    /// Uses a hash function to create independent streams from one seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        Self(hash)
    }
}

impl Default for SimulationSeed {
    fn default() -> Self {
        Self(crate::constants::DEFAULT_SEED)
    }
}

/// A source of uniform draws in `[0, 1)`.
pub trait UniformSource {
    /// Returns the next draw in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl<T: UniformSource + ?Sized> UniformSource for &mut T {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Seeded ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct DropRng {
    rng: ChaCha8Rng,
    seed: SimulationSeed,
}

impl DropRng {
    /// Creates a generator from a seed.
    #[must_use]
    pub fn new(seed: SimulationSeed) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed.value()),
            seed,
        }
    }

    /// Returns the seed this generator started from.
    #[inline]
    #[must_use]
    pub const fn seed(&self) -> SimulationSeed {
        self.seed
    }

    /// Rewinds the generator to its initial state.
    pub fn reset(&mut self) {
        self.rng = ChaCha8Rng::seed_from_u64(self.seed.value());
    }
}

impl UniformSource for DropRng {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of draws, wrapping around at the end.
///
/// Used to force disturbance locations and arrival outcomes.
/// An empty script always yields `0.0`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Creates a source replaying `draws`.
    ///
    /// Values are clamped into `[0, 1)`.
    #[must_use]
    pub fn new(draws: Vec<f64>) -> Self {
        let draws = draws
            .into_iter()
            .map(|u| if u.is_nan() { 0.0 } else { u.clamp(0.0, 1.0 - f64::EPSILON) })
            .collect();
        Self { draws, cursor: 0 }
    }

    /// Number of draws consumed so far.
    #[inline]
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.cursor
    }
}

impl UniformSource for ScriptedSource {
    fn next_unit(&mut self) -> f64 {
        if self.draws.is_empty() {
            return 0.0;
        }
        let u = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        u
    }
}
