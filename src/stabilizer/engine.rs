// src/stabilizer/engine.rs

//! # Heading-Hold Stabilization Engine
//!
//! The engine runs the integer rate PID on roll, pitch and yaw, with heading
//! hold, auto-centering and autolevel. It owns the only persistent state of
//! the control law: the per-axis integral accumulator and the previous
//! cycle's error. Each instance is independent, so several engines can run
//! side by side in a simulation.
//!
//! ## Cycle
//!
//! For each axis, in order roll, pitch, yaw:
//!
//! 1. While stability is enabled the integral is updated: fixed mode lets
//!    the stick re-trim it, gyro readings outside the deadband are
//!    accumulated, and otherwise auto mode decays it toward zero.
//! 2. The rate error is the gyro plus half the stick command. In autolevel
//!    the stick commands attitude instead and the rate error is the gyro
//!    alone.
//! 3. P, clamped I and D are summed and rescaled into the rate correction.
//! 4. In autolevel, roll and pitch also produce an angle correction.
//!
//! ## Preconditions
//!
//! The engine assumes a configuration that passes
//! [`StabilizationConfig::validate`]: gains in `0..=127`, non-negative
//! limits, an I-term limit of at most
//! [`MAX_RATE_SUM`](crate::pid::MAX_RATE_SUM) so that the P+I+D sum fits
//! in 32 bits, and autolevel settings on roll and pitch only. It does not
//! check this per cycle. Use [`StabilizationEngine::try_with_config`] to check on
//! construction.

use crate::pid::{
    compute_autolevel, compute_heading_hold, update_integral, AutolevelData, HeadingHoldData,
    D_TERM_SHIFT, P_TERM_SCALE, RATE_OUTPUT_SHIFT, STICK_RATE_SHIFT,
};
use crate::{
    Axis, AxisGains, ConfigError, CycleInputs, CycleOutputs, FlightStabilizer, PerAxis,
    StabilizationConfig,
};
use log::{debug, trace, warn};
use piddiy::PidController;

/// Persistent engine state, one entry per axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineState {
    /// Heading-hold integral accumulator.
    pub integral_term: PerAxis<i32>,
    /// Rate error from the previous cycle.
    pub last_error: PerAxis<i32>,
}

/// Struct representing the heading-hold stabilization engine.
pub struct StabilizationEngine {
    config: StabilizationConfig,
    integral_term: PerAxis<i32>,
    rate_pids: PerAxis<PidController<i32, HeadingHoldData>>,
}

impl StabilizationEngine {
    /// Creates a new engine using the provided configuration, with zeroed
    /// state.
    ///
    /// The configuration must satisfy the preconditions described in the
    /// module documentation.
    pub fn with_config(config: StabilizationConfig) -> Self {
        Self::with_state(config, EngineState::default())
    }

    /// Creates a new engine after checking the configuration.
    pub fn try_with_config(config: StabilizationConfig) -> Result<Self, ConfigError> {
        if let Err(error) = config.validate() {
            warn!("rejected stabilization config: {}", error);
            return Err(error);
        }
        Ok(Self::with_config(config))
    }

    /// Creates an engine resuming from a saved state, for example to replay
    /// a recorded flight from a known point.
    pub fn with_state(config: StabilizationConfig, state: EngineState) -> Self {
        let rate_pids = PerAxis::from_fn(|axis| {
            let mut pid = rate_pid(&config.axes[axis].gains);
            pid.error = state.last_error[axis];
            pid
        });
        debug!(
            "stabilization engine ready: {:?}",
            PerAxis::from_fn(|axis| config.axes[axis].gains)
        );

        StabilizationEngine {
            config,
            integral_term: state.integral_term,
            rate_pids,
        }
    }

    /// Creates a new engine with default settings.
    pub fn new() -> Self {
        Self::with_config(StabilizationConfig::new())
    }

    /// The active configuration.
    pub fn config(&self) -> &StabilizationConfig {
        &self.config
    }

    /// Replaces the configuration between cycles, keeping the integral and
    /// derivative state so a retune does not bump the airframe.
    pub fn configure(&mut self, config: StabilizationConfig) {
        for axis in Axis::ALL {
            let gains = &config.axes[axis].gains;
            let pid = &mut self.rate_pids[axis];
            pid.kp(p_gain(gains)).kd(d_gain(gains));
        }
        self.config = config;
        debug!("stabilization engine reconfigured");
    }

    /// A snapshot of the persistent state.
    pub fn state(&self) -> EngineState {
        EngineState {
            integral_term: self.integral_term,
            last_error: PerAxis::from_fn(|axis| self.rate_pids[axis].error),
        }
    }

    fn step_axis(&mut self, axis: Axis, inputs: &CycleInputs) -> (i32, Option<i32>) {
        let config = self.config.axes[axis];
        let modes = inputs.modes;
        let rate = inputs.gyro[axis];
        let command = inputs.command(axis);

        if modes.stability {
            self.integral_term[axis] = update_integral(
                self.integral_term[axis],
                rate,
                inputs.rc.stick(axis),
                &config.limits,
                modes.auto_center,
            );
        }

        // In autolevel the stick commands attitude, so it stays out of the
        // rate error.
        let rate_command = if modes.autolevel {
            0
        } else {
            command >> STICK_RATE_SHIFT
        };
        let pid = &mut self.rate_pids[axis];
        pid.set_point(rate_command);
        let rate_sum = pid.compute(HeadingHoldData {
            rate: i32::from(rate),
            integral: self.integral_term[axis],
            i_mult: config.gains.i_mult,
            i_limit: config.limits.raw_i_limit,
        });
        let rate_correction = rate_sum >> RATE_OUTPUT_SHIFT;

        let angle_correction = match config.autolevel {
            Some(level) if modes.autolevel && axis.is_levelled() => Some(compute_autolevel(
                &level,
                AutolevelData {
                    command,
                    attitude: inputs.attitude[axis],
                },
            )),
            _ => None,
        };

        trace!(
            "{:?}: error {} integral {} rate {} angle {:?}",
            axis,
            pid.error,
            self.integral_term[axis],
            rate_correction,
            angle_correction
        );

        (rate_correction, angle_correction)
    }
}

impl Default for StabilizationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FlightStabilizer for StabilizationEngine {
    fn step(&mut self, inputs: &CycleInputs) -> CycleOutputs {
        let mut outputs = CycleOutputs::default();
        for axis in Axis::ALL {
            let (rate_correction, angle_correction) = self.step_axis(axis, inputs);
            outputs.rate_correction[axis] = rate_correction;
            outputs.angle_correction[axis] = angle_correction;
        }
        outputs
    }
}

fn p_gain(gains: &AxisGains) -> i32 {
    i32::from(gains.p_mult) * P_TERM_SCALE
}

fn d_gain(gains: &AxisGains) -> i32 {
    i32::from(gains.d_mult) << D_TERM_SHIFT
}

fn rate_pid(gains: &AxisGains) -> PidController<i32, HeadingHoldData> {
    let mut pid = PidController::new();
    pid.compute_fn(compute_heading_hold)
        .set_point(0)
        .kp(p_gain(gains))
        // The callback returns a fully scaled I-term.
        .ki(1)
        .kd(d_gain(gains));
    pid
}
