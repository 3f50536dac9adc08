//! # RIPPLE Core Engine
//!
//! A rippling liquid surface simulated as a damped-wave height field,
//! driven by randomized raindrops, for real-time visualization.
//!
//! ## Design Principles
//!
//! 1. **Double-buffered**: two grids swap roles every step, never data
//! 2. **Velocity substitution**: the hidden grid's height is the next step's velocity
//! 3. **Deterministic**: all randomness comes from caller-owned sources
//! 4. **Allocation-free stepping**: memory is fixed at construction
//!
//! ## Core Components
//!
//! - `HeightField`: grids, topology, disturbance injection and the update pass
//! - `StepScheduler`: how many drops precede each step
//! - `DropRng` / `ScriptedSource`: seeded and replayed uniform draws
//! - `RippleConfig`: TOML configuration
//!
//! ## Example
//!
//! ```rust,ignore
//! use ripple_core::{DropRng, HeightField, RippleConfig, ARRIVAL_STREAM, PLACEMENT_STREAM};
//!
//! let config = RippleConfig::default();
//! let mut field = config.height_field()?;
//! let scheduler = config.scheduler()?;
//! let mut placement = DropRng::new(config.seed().derive(PLACEMENT_STREAM));
//! let mut arrivals = DropRng::new(config.seed().derive(ARRIVAL_STREAM));
//!
//! // Once per frame
//! scheduler.tick(&mut field, &config.splash, &mut placement, &mut arrivals)?;
//! render(field.current_points(), field.topology());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

pub mod config;
pub mod constants;
pub mod disturbance;
pub mod error;
pub mod height_field;
pub mod point;
pub mod random;
pub mod scheduler;
pub mod topology;

pub use config::{GridConfig, RippleConfig, ScheduleConfig};
pub use constants::{DAMPING, MIN_DIMENSION, SMOOTHING_FACTOR};
pub use disturbance::{check_width, max_width, Disturbance, DisturbanceSite};
pub use error::{RippleError, RippleResult};
pub use height_field::{GridBuffer, HeightField};
pub use point::Point;
pub use random::{DropRng, ScriptedSource, SimulationSeed, UniformSource, ARRIVAL_STREAM, PLACEMENT_STREAM};
pub use scheduler::{check_period, rate_to_period_ms, StepScheduler, TickReport};
pub use topology::{build_topology, index_count};
