// src/config.rs

//! # Stabilization Configuration
//!
//! Gains and limits for each axis. The configuration is a read-only snapshot
//! for the engine: it is loaded and validated by the surrounding firmware and
//! never changed by a stabilization cycle.

use crate::pid::{I_TERM_SHIFT, MAX_RATE_SUM};
use crate::{Axis, ConfigError, PerAxis};

/// Raw I-term limit per percent of the menu-facing limit. 125% maps to
/// 80,000, the largest value the rate sum may hold before the final rescale.
pub const RAW_I_LIMIT_PER_PERCENT: i32 = 640;

/// Largest menu-facing I-term limit, in percent of full servo throw.
pub const MAX_I_LIMIT_PERCENT: u8 = 125;

/// PID gains for one axis. Gains are small integers in `0..=127`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisGains {
    /// Proportional gain.
    pub p_mult: i8,
    /// Integral (heading hold) gain.
    pub i_mult: i8,
    /// Derivative gain.
    pub d_mult: i8,
}

/// Integral bounds for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisLimits {
    /// Bound applied to the integral accumulator before a stick re-trim in
    /// fixed auto-center mode.
    pub raw_i_constrain: i32,
    /// Bound applied to the integral term's contribution to the output.
    pub raw_i_limit: i32,
}

impl AxisLimits {
    /// Derives raw limits from an I-term limit in percent of full servo
    /// throw and the axis I gain. Percentages above
    /// [`MAX_I_LIMIT_PERCENT`] are treated as 125%.
    ///
    /// The constrain bound is the accumulator value at which the scaled
    /// I-term reaches the limit, so a stick re-trim never starts from a
    /// saturated integral.
    ///
    /// ```
    /// use integer_flight_stabilization::AxisLimits;
    ///
    /// let limits = AxisLimits::from_percent(125, 127);
    /// assert_eq!(80_000, limits.raw_i_limit);
    /// assert_eq!(20_157, limits.raw_i_constrain);
    /// ```
    pub fn from_percent(i_limit_percent: u8, i_mult: i8) -> Self {
        let percent = i_limit_percent.min(MAX_I_LIMIT_PERCENT);
        let raw_i_limit = i32::from(percent) * RAW_I_LIMIT_PER_PERCENT;
        let shifted = raw_i_limit << I_TERM_SHIFT;
        let raw_i_constrain = if i_mult > 0 {
            shifted / i32::from(i_mult)
        } else {
            shifted
        };
        AxisLimits {
            raw_i_constrain,
            raw_i_limit,
        }
    }
}

/// Autolevel settings, present on roll and pitch only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AutolevelConfig {
    /// Autolevel proportional gain.
    pub l_mult: i8,
    /// Largest attitude the stick may command, in degrees.
    pub angle_limit: i16,
}

/// Complete settings for one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisConfig {
    /// PID gains.
    pub gains: AxisGains,
    /// Integral bounds.
    pub limits: AxisLimits,
    /// Autolevel settings. `None` for yaw.
    pub autolevel: Option<AutolevelConfig>,
}

/// Configuration snapshot for the stabilization engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StabilizationConfig {
    /// Settings for each axis.
    pub axes: PerAxis<AxisConfig>,
}

impl StabilizationConfig {
    /// Creates a configuration with neutral values: unit P gain, everything
    /// else zero, and autolevel settings on roll and pitch. These should be
    /// replaced with values tuned for the airframe.
    ///
    /// Example Usage
    /// ```
    /// use integer_flight_stabilization::{AxisLimits, Axis, StabilizationConfig};
    ///
    /// let mut config = StabilizationConfig::new();
    ///
    /// // Heading hold on yaw.
    /// config.axes[Axis::Yaw].gains.p_mult = 60;
    /// config.axes[Axis::Yaw].gains.i_mult = 40;
    /// config.axes[Axis::Yaw].limits = AxisLimits::from_percent(100, 40);
    ///
    /// // Autolevel on roll, 45 degrees maximum.
    /// if let Some(level) = config.axes[Axis::Roll].autolevel.as_mut() {
    ///     level.l_mult = 60;
    ///     level.angle_limit = 45;
    /// }
    ///
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new() -> Self {
        Self {
            axes: PerAxis::from_fn(|axis| AxisConfig {
                gains: AxisGains {
                    p_mult: 1,
                    i_mult: 0,
                    d_mult: 0,
                },
                limits: AxisLimits::default(),
                autolevel: axis.is_levelled().then(AutolevelConfig::default),
            }),
        }
    }

    /// Checks the engine's preconditions: non-negative gains and limits, an
    /// I-term limit no larger than [`MAX_RATE_SUM`], and autolevel settings
    /// on exactly the levelled axes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (axis, config) in self.axes.iter() {
            validate_axis(axis, config)?;
        }
        Ok(())
    }
}

impl Default for StabilizationConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_axis(axis: Axis, config: &AxisConfig) -> Result<(), ConfigError> {
    let AxisGains {
        p_mult,
        i_mult,
        d_mult,
    } = config.gains;
    for gain in [p_mult, i_mult, d_mult] {
        check_gain(axis, gain)?;
    }

    let AxisLimits {
        raw_i_constrain,
        raw_i_limit,
    } = config.limits;
    for limit in [raw_i_constrain, raw_i_limit] {
        check_limit(axis, limit)?;
    }
    if raw_i_limit > MAX_RATE_SUM {
        return Err(ConfigError::ILimitTooLarge {
            axis,
            limit: raw_i_limit,
        });
    }

    match (axis.is_levelled(), config.autolevel) {
        (true, Some(level)) => {
            check_gain(axis, level.l_mult)?;
            check_limit(axis, i32::from(level.angle_limit))
        }
        (false, None) => Ok(()),
        _ => Err(ConfigError::AutolevelMismatch { axis }),
    }
}

fn check_gain(axis: Axis, gain: i8) -> Result<(), ConfigError> {
    if gain < 0 {
        return Err(ConfigError::NegativeGain { axis, gain });
    }
    Ok(())
}

fn check_limit(axis: Axis, limit: i32) -> Result<(), ConfigError> {
    if limit < 0 {
        return Err(ConfigError::NegativeLimit { axis, limit });
    }
    Ok(())
}
