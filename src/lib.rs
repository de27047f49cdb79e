// src/lib.rs

//! # Integer Flight Stabilization
//!
//! This crate provides a `no_std`, no-alloc heading-hold stabilization
//! engine for multi-rotor and VTOL flight controllers. Once per control
//! cycle it turns gyro rates, an optional attitude estimate and pilot stick
//! commands into per-axis corrections for the mixer, using integer
//! fixed-point PID arithmetic tuned to the servo output envelope.
//!
//! ```
//! use integer_flight_stabilization::{
//!     AutoCenter, Axis, CycleInputs, FlightStabilizer, ModeFlags, PerAxis,
//!     StabilizationConfig, StabilizationEngine,
//! };
//!
//! let mut config = StabilizationConfig::new();
//! config.axes[Axis::Roll].gains.p_mult = 20;
//! let mut engine = StabilizationEngine::try_with_config(config).unwrap();
//!
//! let inputs = CycleInputs {
//!     gyro: PerAxis::new(100, 0, 0),
//!     modes: ModeFlags::rate(AutoCenter::Fixed),
//!     ..CycleInputs::default()
//! };
//! let outputs = engine.step(&inputs);
//! assert_eq!(93, outputs.rate_correction[Axis::Roll]);
//! ```

#![no_std]
#![deny(missing_docs)]

pub mod axis;
pub use axis::*;
pub mod config;
pub use config::*;
pub mod error;
pub use error::*;
pub mod pid;
pub mod stabilizer;

#[doc(inline)]
pub use stabilizer::*;

#[cfg(test)]
mod test_utils;
