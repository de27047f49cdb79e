// src/axis.rs

//! # Axes and RC Channels
//!
//! Strongly typed indices for the three control axes and for the RC
//! channels that feed them. Every per-axis quantity in this crate is a
//! [`PerAxis`] value indexed by [`Axis`], so an axis can never be confused
//! with a raw array position.

use core::ops::{Index, IndexMut};

/// An independent control dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Rotation about the longitudinal axis.
    Roll,
    /// Rotation about the lateral axis.
    Pitch,
    /// Rotation about the vertical axis.
    Yaw,
}

impl Axis {
    /// All axes in processing order.
    pub const ALL: [Axis; 3] = [Axis::Roll, Axis::Pitch, Axis::Yaw];

    /// Position of the axis in a [`PerAxis`] array.
    pub const fn index(self) -> usize {
        match self {
            Axis::Roll => 0,
            Axis::Pitch => 1,
            Axis::Yaw => 2,
        }
    }

    /// Whether the axis takes part in autolevel. Yaw has no attitude
    /// reference and is always rate-only.
    pub const fn is_levelled(self) -> bool {
        !matches!(self, Axis::Yaw)
    }

    /// The RC channel carrying the pilot's stick command for this axis.
    pub const fn stick_channel(self) -> RcChannel {
        match self {
            Axis::Roll => RcChannel::Aileron,
            Axis::Pitch => RcChannel::Elevator,
            Axis::Yaw => RcChannel::Rudder,
        }
    }
}

/// One value per control axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PerAxis<T>(pub [T; 3]);

impl<T> PerAxis<T> {
    /// Creates a set of values from roll, pitch and yaw components.
    pub const fn new(roll: T, pitch: T, yaw: T) -> Self {
        PerAxis([roll, pitch, yaw])
    }

    /// Builds a set of values by calling `f` for each axis in processing order.
    pub fn from_fn(mut f: impl FnMut(Axis) -> T) -> Self {
        PerAxis([f(Axis::Roll), f(Axis::Pitch), f(Axis::Yaw)])
    }

    /// Iterates over `(axis, value)` pairs in processing order.
    pub fn iter(&self) -> impl Iterator<Item = (Axis, &T)> {
        Axis::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T: Copy> PerAxis<T> {
    /// The same value on every axis.
    pub const fn splat(value: T) -> Self {
        PerAxis([value; 3])
    }
}

impl<T> Index<Axis> for PerAxis<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        &self.0[axis.index()]
    }
}

impl<T> IndexMut<Axis> for PerAxis<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        &mut self.0[axis.index()]
    }
}

/// Number of channels in an [`RcFrame`].
pub const RC_CHANNELS: usize = 8;

/// A channel of the decoded RC frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RcChannel {
    /// Throttle stick.
    Throttle,
    /// Roll stick.
    Aileron,
    /// Pitch stick.
    Elevator,
    /// Yaw stick.
    Rudder,
    /// Gear switch.
    Gear,
    /// First auxiliary channel, commonly used for flaps.
    Aux1,
    /// Second auxiliary channel.
    Aux2,
    /// Third auxiliary channel.
    Aux3,
}

impl RcChannel {
    /// Position of the channel in an [`RcFrame`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Stick values for one cycle, centered on zero.
///
/// Decoding and centering belong to the receiver driver; a full-throw stick
/// is roughly ±1000 units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RcFrame(pub [i16; RC_CHANNELS]);

impl RcFrame {
    /// A frame with every stick centered.
    pub const fn centered() -> Self {
        RcFrame([0; RC_CHANNELS])
    }

    /// Sets one channel, returning the frame for chaining.
    pub fn with(mut self, channel: RcChannel, value: i16) -> Self {
        self[channel] = value;
        self
    }

    /// The stick command for an axis.
    pub fn stick(&self, axis: Axis) -> i16 {
        self[axis.stick_channel()]
    }
}

impl Index<RcChannel> for RcFrame {
    type Output = i16;

    fn index(&self, channel: RcChannel) -> &i16 {
        &self.0[channel.index()]
    }
}

impl IndexMut<RcChannel> for RcFrame {
    fn index_mut(&mut self, channel: RcChannel) -> &mut i16 {
        &mut self.0[channel.index()]
    }
}
