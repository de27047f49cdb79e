// src/error.rs

//! Configuration errors.
//!
//! The stabilization cycle itself cannot fail. These errors describe
//! configuration snapshots that break the engine's preconditions and are
//! reported by [`StabilizationConfig::validate`](crate::StabilizationConfig::validate).

use crate::pid::MAX_RATE_SUM;
use crate::Axis;
use core::fmt::{self, Display, Formatter};

/// A configuration value outside the range the fixed-point envelope was
/// designed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A P, I, D or autolevel gain is negative.
    NegativeGain {
        /// Axis carrying the gain.
        axis: Axis,
        /// The offending gain.
        gain: i8,
    },
    /// An integral or angle limit is negative.
    NegativeLimit {
        /// Axis carrying the limit.
        axis: Axis,
        /// The offending limit.
        limit: i32,
    },
    /// The I-term limit exceeds the largest rate sum the output can use,
    /// so P+I+D could leave 32 bits.
    ILimitTooLarge {
        /// Axis carrying the limit.
        axis: Axis,
        /// The offending limit.
        limit: i32,
    },
    /// Autolevel settings are present on yaw or missing on roll/pitch.
    AutolevelMismatch {
        /// Axis with the mismatch.
        axis: Axis,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ConfigError::NegativeGain { axis, gain } => {
                write!(f, "{:?} gain {} is negative", axis, gain)
            }
            ConfigError::NegativeLimit { axis, limit } => {
                write!(f, "{:?} limit {} is negative", axis, limit)
            }
            ConfigError::ILimitTooLarge { axis, limit } => {
                write!(f, "{:?} I-term limit {} exceeds {}", axis, limit, MAX_RATE_SUM)
            }
            ConfigError::AutolevelMismatch { axis } => {
                if axis.is_levelled() {
                    write!(f, "{:?} is missing autolevel settings", axis)
                } else {
                    write!(f, "{:?} cannot carry autolevel settings", axis)
                }
            }
        }
    }
}
