//! # RIPPLE
//!
//! Session driver for the ripple engine.
//!
//! The host render loop owns the clock and the window; this crate turns
//! "a frame happened at `now_ms`" into the right number of raindrops and
//! exactly one simulation step.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ripple::{RippleSession, core::RippleConfig};
//!
//! let mut session = RippleSession::new(&RippleConfig::from_file("ripple.toml")?)?;
//! session.start(0.0);
//! while let Some(now) = next_frame() {
//!     if session.advance(now)?.is_some() {
//!         mesh.set_positions(session.points());
//!     }
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]

pub mod gate;
pub mod session;
pub mod stats;

/// Re-export of the engine crate.
pub use ripple_core as core;

pub use gate::{GateStats, TickGate};
pub use session::RippleSession;
pub use stats::SurfaceStats;
