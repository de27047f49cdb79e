// src/pid/autolevel.rs

//! # Autolevel Angle Term
//!
//! In autolevel the stick commands an attitude instead of a rate. The angle
//! term is produced separately from the rate correction and the mixer
//! accumulates the two independently.

use super::{constrain, ANGLE_OUTPUT_SHIFT, STICK_ANGLE_SHIFT};
use crate::AutolevelConfig;

/// Control data for the autolevel angle term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AutolevelData {
    /// Stick command including any flap offset, in stick units.
    pub command: i32,
    /// Attitude estimate in degrees.
    pub attitude: i16,
}

/// Computes the angle correction for one levelled axis.
pub fn compute_autolevel(level: &AutolevelConfig, data: AutolevelData) -> i32 {
    let target = constrain(
        data.command >> STICK_ANGLE_SHIFT,
        i32::from(level.angle_limit),
    );

    // Measured angle polarity opposes the stick, so it is added.
    let angle_error = target + i32::from(data.attitude);

    (angle_error * i32::from(level.l_mult)) >> ANGLE_OUTPUT_SHIFT
}
