// src/test_utils.rs

//! This module contains utilities for testing.

use crate::pid::MAX_RATE_SUM;
use crate::{
    AutolevelConfig, Axis, AxisGains, AxisLimits, CycleInputs, CycleOutputs, FlightStabilizer,
    ModeFlags, PerAxis, StabilizationConfig,
};

/// The widest limits a valid configuration allows: the accumulator is
/// unbounded and the I-term may fill the whole rate sum.
pub const WIDE_LIMITS: AxisLimits = AxisLimits {
    raw_i_constrain: i32::MAX,
    raw_i_limit: MAX_RATE_SUM,
};

/// Builds a configuration with the same gains and limits on every axis.
///
/// # Arguments
/// * `gains` - The P, I and D gains.
/// * `limits` - The integral bounds.
/// * `level` - Autolevel settings for roll and pitch.
pub fn uniform_config(
    gains: AxisGains,
    limits: AxisLimits,
    level: AutolevelConfig,
) -> StabilizationConfig {
    let mut config = StabilizationConfig::new();
    for axis in Axis::ALL {
        let axis_config = &mut config.axes[axis];
        axis_config.gains = gains;
        axis_config.limits = limits;
        if axis.is_levelled() {
            axis_config.autolevel = Some(level);
        }
    }
    config
}

/// Builds a rate-only configuration with wide limits.
pub fn gains_config(p_mult: i8, i_mult: i8, d_mult: i8) -> StabilizationConfig {
    uniform_config(
        AxisGains {
            p_mult,
            i_mult,
            d_mult,
        },
        WIDE_LIMITS,
        AutolevelConfig::default(),
    )
}

/// Builds inputs with the given gyro readings, centered sticks and level
/// attitude.
pub fn gyro_inputs(gyro: PerAxis<i16>, modes: ModeFlags) -> CycleInputs {
    CycleInputs {
        gyro,
        modes,
        ..CycleInputs::default()
    }
}

/// Steps a stabilizer `cycles` times with the same inputs, returning the
/// last outputs.
pub fn run_cycles<S: FlightStabilizer>(
    stabilizer: &mut S,
    inputs: &CycleInputs,
    cycles: usize,
) -> CycleOutputs {
    let mut outputs = CycleOutputs::default();
    for _ in 0..cycles {
        outputs = stabilizer.step(inputs);
    }
    outputs
}

/// A small deterministic generator for pseudo-random test inputs.
pub struct Lcg(pub u32);

impl Lcg {
    /// Next value spread over the full `i16` range.
    pub fn next_i16(&mut self) -> i16 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (self.0 >> 16) as u16 as i16
    }

    /// Next value in `-range..=range`.
    pub fn next_within(&mut self, range: i16) -> i16 {
        let span = i32::from(range) * 2 + 1;
        (i32::from(self.next_i16()).rem_euclid(span) - i32::from(range)) as i16
    }
}
