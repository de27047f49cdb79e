// demos/hover.rs

use integer_flight_stabilization::{
    AutoCenter, Axis, AxisLimits, CycleInputs, FlightStabilizer, ModeFlags, PerAxis, RcChannel,
    RcFrame, StabilizationConfig, StabilizationEngine,
};

fn main() {
    let mut config = StabilizationConfig::new();

    // Set the PID gains for roll, pitch, and yaw.
    for axis in Axis::ALL {
        let gains = &mut config.axes[axis].gains;
        gains.p_mult = 60;
        gains.i_mult = 40;
        gains.d_mult = 20;
        config.axes[axis].limits = AxisLimits::from_percent(100, 40);
    }

    // Autolevel on roll and pitch, 45 degrees maximum.
    for axis in [Axis::Roll, Axis::Pitch] {
        if let Some(level) = config.axes[axis].autolevel.as_mut() {
            level.l_mult = 60;
            level.angle_limit = 45;
        }
    }

    let mut engine = match StabilizationEngine::try_with_config(config) {
        Ok(engine) => engine,
        Err(error) => {
            eprintln!("invalid configuration: {}", error);
            return;
        }
    };

    // A gust rolls the airframe right and yaws it left while the pilot
    // commands a gentle right bank.
    let mut attitude = PerAxis::new(10i32, 0, 0);
    let mut gyro = PerAxis::new(-200i32, 0, 150);
    let rc = RcFrame::centered().with(RcChannel::Aileron, 160);
    let modes = ModeFlags::autolevel(AutoCenter::Auto);

    println!("                  Roll,    Pitch,      Yaw");
    for cycle in 0..=20 {
        let inputs = CycleInputs {
            gyro: PerAxis::from_fn(|axis| clamp_i16(gyro[axis])),
            attitude: PerAxis::from_fn(|axis| clamp_i16(attitude[axis])),
            rc,
            flap_offset_channel: PerAxis::splat(None),
            modes,
        };
        let outputs = engine.step(&inputs);

        // print results
        println!("cycle = {}", cycle);
        println!(
            "    Attitude: {:-8}, {:-8}, {:-8}",
            attitude[Axis::Roll],
            attitude[Axis::Pitch],
            attitude[Axis::Yaw]
        );
        println!(
            "    Gyro:     {:-8}, {:-8}, {:-8}",
            gyro[Axis::Roll],
            gyro[Axis::Pitch],
            gyro[Axis::Yaw]
        );
        println!(
            "    Rate:     {:-8}, {:-8}, {:-8}",
            outputs.rate_correction[Axis::Roll],
            outputs.rate_correction[Axis::Pitch],
            outputs.rate_correction[Axis::Yaw]
        );
        println!(
            "    Angle:    {:-8}, {:-8}",
            outputs.angle_correction[Axis::Roll].unwrap_or(0),
            outputs.angle_correction[Axis::Pitch].unwrap_or(0)
        );

        // simulate response: the mixer's correction opposes the measured
        // rate, and the attitude follows the rate.
        for axis in Axis::ALL {
            let correction = outputs.rate_correction[axis]
                + outputs.angle_correction[axis].unwrap_or(0);
            gyro[axis] = (gyro[axis] - correction / 16).clamp(-2000, 2000);
            attitude[axis] = (attitude[axis] - gyro[axis] / 64).clamp(-90, 90);
        }
    }

    println!("final state: {:?}", engine.state());
}

fn clamp_i16(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}
