// src/stabilizer/flight_stabilizer.rs

//! A module specifying the shared interface between the control-loop
//! scheduler and a flight stabilizer, along with the per-cycle data that
//! crosses it. The scheduler samples sensors and RC, builds a
//! [`CycleInputs`], calls [`FlightStabilizer::step`] once per tick and hands
//! the [`CycleOutputs`] to the mixer.

use crate::{Axis, PerAxis, RcChannel, RcFrame};

/// How the integral term is re-centered when there is no rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AutoCenter {
    /// The integral holds its value; stick deflection re-trims it.
    #[default]
    Fixed,
    /// The integral decays toward zero by one unit per cycle.
    Auto,
}

/// Mode flags for one cycle, chosen by the flight-mode logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeFlags {
    /// Integral (heading hold) accumulation is active. When false the
    /// integral is frozen, not reset.
    pub stability: bool,
    /// The stick commands attitude on roll and pitch.
    pub autolevel: bool,
    /// Integral re-centering policy.
    pub auto_center: AutoCenter,
}

impl ModeFlags {
    /// Stabilization off: the integral is frozen and only P and D act.
    pub const DISABLED: ModeFlags = ModeFlags {
        stability: false,
        autolevel: false,
        auto_center: AutoCenter::Fixed,
    };

    /// Rate control with heading hold.
    pub const fn rate(auto_center: AutoCenter) -> Self {
        ModeFlags {
            stability: true,
            autolevel: false,
            auto_center,
        }
    }

    /// Heading hold plus autolevel on roll and pitch.
    pub const fn autolevel(auto_center: AutoCenter) -> Self {
        ModeFlags {
            stability: true,
            autolevel: true,
            auto_center,
        }
    }
}

/// Everything the stabilizer reads in one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleInputs {
    /// Rate gyro readings.
    pub gyro: PerAxis<i16>,
    /// Attitude estimate in degrees. Yaw is ignored.
    pub attitude: PerAxis<i16>,
    /// Centered stick values.
    pub rc: RcFrame,
    /// Secondary channel whose value is a fixed offset on the axis (such as
    /// flaperons on roll) and must not be treated as a rate command.
    pub flap_offset_channel: PerAxis<Option<RcChannel>>,
    /// Mode flags.
    pub modes: ModeFlags,
}

impl CycleInputs {
    /// The stick command for an axis, flap offset included.
    pub fn command(&self, axis: Axis) -> i32 {
        let offset = self.flap_offset_channel[axis].map_or(0, |channel| i32::from(self.rc[channel]));
        i32::from(self.rc.stick(axis)) + offset
    }
}

/// Corrections produced in one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleOutputs {
    /// Rate correction per axis, in mixer units.
    pub rate_correction: PerAxis<i32>,
    /// Autolevel correction for roll and pitch while autolevel is enabled.
    /// The mixer adds it separately; absent means zero.
    pub angle_correction: PerAxis<Option<i32>>,
}

/// A trait for stabilizers driven once per control-loop tick.
pub trait FlightStabilizer {
    /// Runs one stabilization cycle.
    ///
    /// Must complete in bounded, constant time. The only state it may change
    /// is the stabilizer's own.
    fn step(&mut self, inputs: &CycleInputs) -> CycleOutputs;
}
