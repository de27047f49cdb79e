// src/pid/heading_hold.rs

//! # Heading-Hold Rate PID Module
//!
//! This module provides the compute function and control data structure for
//! the integer rate PID used on every axis, together with the integral-term
//! update rule that implements heading hold and auto-centering.

use super::{constrain, outside_deadband, I_TERM_SHIFT, STICK_TRIM_SHIFT};
use crate::{AutoCenter, AxisLimits};
use piddiy::PidController;

/// Control data for the heading-hold rate PID callback.
///
/// The controller's set point carries the stick rate command for the cycle;
/// its stored error is the previous cycle's error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HeadingHoldData {
    /// The measured rotation rate, typically reported by a gyro.
    pub rate: i32,
    /// The heading-hold accumulator after this cycle's update.
    pub integral: i32,
    /// The I gain.
    pub i_mult: i8,
    /// Bound on the scaled I-term.
    pub i_limit: i32,
}

/// Heading-hold rate PID compute callback.
///
/// Returns `(error, i_term, derivative)`. The I-term is already gained,
/// scaled and clamped, so the controller runs with `ki = 1`.
pub fn compute_heading_hold(
    pid: &mut PidController<i32, HeadingHoldData>,
    data: HeadingHoldData,
) -> (i32, i32, i32) {
    // Gyro polarity opposes the stick, so the command is added.
    let error = data.rate + pid.set_point;
    let integral = i_term(data.integral, data.i_mult, data.i_limit);
    let derivative = error - pid.error;

    (error, integral, derivative)
}

/// Scales the heading-hold accumulator by the I gain and clamps it to
/// `±limit`.
///
/// The product is formed in 64 bits, so any accumulator value is safe at any
/// gain.
pub fn i_term(integral: i32, i_mult: i8, limit: i32) -> i32 {
    let unclamped = (i64::from(integral) * i64::from(i_mult)) >> I_TERM_SHIFT;
    // Clamped to an i32 bound, so the narrowing is lossless.
    constrain(unclamped, i64::from(limit)) as i32
}

/// Applies one cycle of the integral-term update rule.
///
/// In fixed mode a deflected stick first bounds the accumulator to the
/// constrain limit and then re-trims it by an eighth of the stick. Gyro
/// readings outside the deadband are accumulated. Otherwise auto mode pulls
/// the accumulator one unit toward zero.
///
/// The caller skips this entirely while stability is disabled.
pub fn update_integral(
    integral: i32,
    rate: i16,
    stick: i16,
    limits: &AxisLimits,
    auto_center: AutoCenter,
) -> i32 {
    let mut integral = integral;

    if auto_center == AutoCenter::Fixed && stick != 0 {
        integral = constrain(integral, limits.raw_i_constrain);
        integral = integral.saturating_add(i32::from(stick >> STICK_TRIM_SHIFT));
    }

    if outside_deadband(rate) {
        integral = integral.saturating_add(i32::from(rate));
    } else if auto_center == AutoCenter::Auto {
        // signum never overshoots zero.
        integral -= integral.signum();
    }

    integral
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits(raw_i_constrain: i32, raw_i_limit: i32) -> AxisLimits {
        AxisLimits {
            raw_i_constrain,
            raw_i_limit,
        }
    }

    fn heading_hold_pid(kp: i32, kd: i32) -> PidController<i32, HeadingHoldData> {
        let mut pid = PidController::new();
        pid.compute_fn(compute_heading_hold)
            .set_point(0)
            .kp(kp)
            .ki(1)
            .kd(kd);
        pid
    }

    /// Test that the I-term is clamped to the specified limit.
    #[test]
    fn test_i_term_clamping() {
        assert_eq!(3_968_750, i_term(1_000_000, 127, i32::MAX));
        assert_eq!(20_000, i_term(1_000_000, 127, 20_000));
        assert_eq!(-20_000, i_term(-1_000_000, 127, 20_000));
    }

    /// Test that a saturated accumulator cannot overflow the I product.
    #[test]
    fn test_i_term_saturated_accumulator() {
        assert_eq!(80_000, i_term(i32::MAX, 127, 80_000));
        assert_eq!(-80_000, i_term(i32::MIN, 127, 80_000));
    }

    /// Test that the I-term scales by a thirty-second of the gained value.
    #[test]
    fn test_i_term_scale() {
        assert_eq!(32, i_term(32, 32, 1_000));
        assert_eq!(0, i_term(31, 1, 1_000));
        // Arithmetic shift rounds toward negative infinity.
        assert_eq!(-1, i_term(-31, 1, 1_000));
    }

    /// Test that gyro readings inside the deadband are not accumulated.
    #[test]
    fn test_update_integral_deadband() {
        let limits = limits(1_000, 1_000);
        for rate in -5..=5 {
            assert_eq!(
                42,
                update_integral(42, rate, 0, &limits, AutoCenter::Fixed),
                "Rate {} should be ignored.",
                rate
            );
        }
        assert_eq!(48, update_integral(42, 6, 0, &limits, AutoCenter::Fixed));
        assert_eq!(36, update_integral(42, -6, 0, &limits, AutoCenter::Auto));
    }

    /// Test that auto mode decays toward zero without overshooting.
    #[test]
    fn test_update_integral_auto_decay() {
        let limits = limits(1_000, 1_000);
        assert_eq!(2, update_integral(3, 0, 0, &limits, AutoCenter::Auto));
        assert_eq!(-2, update_integral(-3, 4, 0, &limits, AutoCenter::Auto));
        assert_eq!(0, update_integral(0, -5, 0, &limits, AutoCenter::Auto));
        assert_eq!(0, update_integral(1, 0, 0, &limits, AutoCenter::Auto));
        assert_eq!(0, update_integral(-1, 0, 0, &limits, AutoCenter::Auto));
    }

    /// Test that fixed mode holds the accumulator when there is no input.
    #[test]
    fn test_update_integral_fixed_holds() {
        let limits = limits(10, 1_000);
        assert_eq!(500, update_integral(500, 3, 0, &limits, AutoCenter::Fixed));
    }

    /// Test that a stick re-trim constrains before adding.
    #[test]
    fn test_update_integral_fixed_stick_retrim() {
        let limits = limits(100, 1_000);
        // 500 is bounded to 100, then an eighth of 80 is added.
        assert_eq!(110, update_integral(500, 0, 80, &limits, AutoCenter::Fixed));
        assert_eq!(-90, update_integral(-500, 0, 80, &limits, AutoCenter::Fixed));
        // Gyro input is accumulated after the re-trim.
        assert_eq!(60, update_integral(0, 50, 80, &limits, AutoCenter::Fixed));
        // Negative sticks shift arithmetically.
        assert_eq!(-1, update_integral(0, 0, -1, &limits, AutoCenter::Fixed));
    }

    /// Test that auto mode ignores the stick re-trim.
    #[test]
    fn test_update_integral_auto_ignores_stick() {
        let limits = limits(100, 1_000);
        assert_eq!(499, update_integral(500, 0, 800, &limits, AutoCenter::Auto));
    }

    /// Test that accumulation saturates instead of wrapping.
    #[test]
    fn test_update_integral_saturates() {
        let limits = limits(i32::MAX, i32::MAX);
        assert_eq!(
            i32::MAX,
            update_integral(i32::MAX - 10, i16::MAX, 0, &limits, AutoCenter::Fixed)
        );
        assert_eq!(
            i32::MIN,
            update_integral(i32::MIN + 10, i16::MIN, 0, &limits, AutoCenter::Fixed)
        );
    }

    /// Test PID response with a stick command and zero rate.
    #[test]
    fn test_heading_hold_response() {
        let mut pid = heading_hold_pid(3, 16);
        pid.set_point(50);
        let data = HeadingHoldData {
            rate: 0,
            integral: 64,
            i_mult: 1,
            i_limit: 1_000,
        };

        let (error, integral, derivative) = compute_heading_hold(&mut pid, data);
        let output = pid.compute(data);
        assert_eq!(50, error, "Error should be the command.");
        assert_eq!(2, integral, "I-term should be a thirty-second of 64.");
        assert_eq!(50, derivative, "Derivative should start from zero.");
        assert_eq!(50 * 3 + 2 + 50 * 16, output, "Output should be the sum of terms.");

        // Call again to test derivative tracking.
        let (error, _, derivative) = compute_heading_hold(&mut pid, data);
        let output = pid.compute(data);
        assert_eq!(50, error);
        assert_eq!(0, derivative, "Derivative should be zero.");
        assert_eq!(50 * 3 + 2, output);
    }

    /// Test that the rate and command are added, not subtracted.
    #[test]
    fn test_heading_hold_polarity() {
        let mut pid = heading_hold_pid(1, 0);
        pid.set_point(-40);
        let data = HeadingHoldData {
            rate: 40,
            ..HeadingHoldData::default()
        };

        assert_eq!(0, pid.compute(data), "Opposing rate should cancel the command.");
    }

    /// Test that PID computes zero output for zero error with zero initial conditions.
    #[test]
    fn test_heading_hold_zero_conditions() {
        let mut pid = heading_hold_pid(381, 2032);
        let data = HeadingHoldData {
            rate: 0,
            integral: 0,
            i_mult: 127,
            i_limit: 80_000,
        };

        let (error, integral, derivative) = compute_heading_hold(&mut pid, data);
        let output = pid.compute(data);
        assert_eq!((0, 0, 0), (error, integral, derivative));
        assert_eq!(0, output, "Output should be zero.");
    }
}
