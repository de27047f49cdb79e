// src/pid.rs

//! # Fixed-Point PID Module
//!
//! This module provides compute functions and control data structures to
//! perform the integer PID calculations of the stabilization engine, along
//! with the scale factors that define its numeric envelope.
//!
//! ## Numeric Envelope
//!
//! Servo outputs span 2500 to 5000 centered on 3750 before the output stage
//! rescales them to 1000..2000, so the largest correction the mixer can use
//! is ±1250. Working backwards through the final ÷64 rescale, the rate sum
//! may hold ±80,000. The I-term is divided by 32 before it joins the sum so
//! that a gain of 127 still yields usable authority: the accumulator reaches
//! full scale at about ±20,157. A constant gyro value of 50 accumulated at
//! 400 Hz gets there in about one second at maximum gain.
//!
//! These shifts and multipliers are part of the control law. They are not
//! tuning parameters.

pub mod autolevel;
pub use autolevel::*;
pub mod heading_hold;
pub use heading_hold::*;

use num_traits::Signed;

/// Gyro magnitudes at or below this value are not accumulated into the
/// integral term.
pub const GYRO_DEADBAND: i16 = 5;

/// P-term multiplier applied on top of the P gain.
pub const P_TERM_SCALE: i32 = 3;

/// Right shift applied to the gained integral (÷32).
pub const I_TERM_SHIFT: u32 = 5;

/// Left shift applied to the gained derivative (×16).
pub const D_TERM_SHIFT: u32 = 4;

/// Right shift rescaling the P+I+D sum to the mixer range (÷64).
pub const RATE_OUTPUT_SHIFT: u32 = 6;

/// Right shift applied to the stick before it re-trims the integral (÷8).
pub const STICK_TRIM_SHIFT: u32 = 3;

/// Right shift applied to the stick before it enters the rate error (÷2).
pub const STICK_RATE_SHIFT: u32 = 1;

/// Right shift converting stick units to degrees (÷16, 1000 ≈ 62.5°).
pub const STICK_ANGLE_SHIFT: u32 = 4;

/// Right shift applied to the gained angle error (÷4).
pub const ANGLE_OUTPUT_SHIFT: u32 = 2;

/// Largest rate correction the mixer can turn into servo throw.
pub const MAX_RATE_CORRECTION: i32 = 1250;

/// Largest P+I+D sum that still maps inside [`MAX_RATE_CORRECTION`].
pub const MAX_RATE_SUM: i32 = MAX_RATE_CORRECTION << RATE_OUTPUT_SHIFT;

/// Clamps `value` into `[-limit, +limit]`.
///
/// `limit` must be non-negative.
#[inline]
pub fn constrain<T: Signed + PartialOrd + Copy>(value: T, limit: T) -> T {
    num_traits::clamp(value, -limit, limit)
}

/// Whether a gyro reading is large enough to count as rotation.
#[inline]
pub fn outside_deadband(rate: i16) -> bool {
    // Compare in i32 so i16::MIN has a magnitude.
    i32::from(rate).abs() > i32::from(GYRO_DEADBAND)
}
