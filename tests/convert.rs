#![allow(missing_docs)]
//! Host-level tests for the PWM register math.

use pwm_envoy::Error;
use pwm_envoy::pwm::convert::{
    DIV16_MAX, DIV16_MIN, DUTY_FULL_SCALE, TOP_MAX, compare_to_duty_ns, compare_to_duty_u16,
    duty_ns_to_compare, duty_u16_to_compare, frequency_to_registers, registers_to_frequency,
    slice_hz,
};

/// Stock system clock on the Pico 1.
const CLK: u32 = 125_000_000;

#[test]
fn one_khz_maximizes_top() {
    // 16 * 125 MHz / 1 kHz = 2_000_000 = 2^7 * 5^6; six fives and two twos
    // fit under TOP_MAX, leaving a divisor of 2.0.
    let (div16, top) = frequency_to_registers(CLK, 1_000).unwrap();
    assert_eq!((div16, top), (32, 62_500));
    assert_eq!(registers_to_frequency(CLK, div16, top), 1_000);
}

#[test]
fn servo_rate_round_trips_exactly() {
    let (div16, top) = frequency_to_registers(CLK, 50).unwrap();
    assert_eq!((div16, top), (640, 62_500));
    assert_eq!(registers_to_frequency(CLK, div16, top), 50);
}

#[test]
fn system_clock_itself_is_reachable() {
    // Divisor 1.0 with top = 1 is the fastest programmable output.
    let (div16, top) = frequency_to_registers(CLK, CLK).unwrap();
    assert_eq!((div16, top), (16, 1));
    assert_eq!(registers_to_frequency(CLK, div16, top), CLK);
}

#[test]
fn registers_stay_in_hardware_range() {
    for freq_hz in [
        8,
        50,
        60,
        440,
        1_000,
        38_000,
        100_000,
        1_000_000,
        62_500_000,
        125_000_000,
    ] {
        let (div16, top) = frequency_to_registers(CLK, freq_hz).unwrap();
        assert!((DIV16_MIN..DIV16_MAX).contains(&div16), "freq {freq_hz}");
        assert!((1..=TOP_MAX).contains(&top), "freq {freq_hz}");
    }
}

#[test]
fn frequency_above_system_clock_is_too_high() {
    // div16_top = 8, below the minimum divider encoding of 16.
    assert_eq!(
        frequency_to_registers(CLK, 2 * CLK),
        Err(Error::FrequencyTooHigh)
    );
}

#[test]
fn seven_hz_is_below_the_divider_range() {
    // The slowest reachable output at 125 MHz is a little under 7.5 Hz.
    assert_eq!(frequency_to_registers(CLK, 7), Err(Error::FrequencyTooLow));
}

#[test]
fn frequency_getter_divides_by_top_not_top_plus_one() {
    // Long-standing observable behavior: the getter is the algebraic inverse
    // of the register pair, not of the physical period (which has top + 1
    // counter steps).
    assert_eq!(registers_to_frequency(CLK, 16, 2), CLK / 2);
}

#[test]
fn duty_endpoints_map_to_never_and_always_high() {
    assert_eq!(duty_u16_to_compare(0, 62_500), 0);
    // Full scale maps to top + 1, one past the counter's last value.
    assert_eq!(duty_u16_to_compare(DUTY_FULL_SCALE, 62_500), 62_501);
    assert_eq!(duty_u16_to_compare(DUTY_FULL_SCALE, TOP_MAX), 65_535);
    assert_eq!(compare_to_duty_u16(65_535, TOP_MAX), DUTY_FULL_SCALE);
    assert_eq!(compare_to_duty_u16(0, 62_500), 0);
}

#[test]
fn duty_round_trip_loss_is_bounded() {
    for top in [4_u16, 99, 62_500, TOP_MAX] {
        let bound = u32::from(DUTY_FULL_SCALE) / (u32::from(top) + 1) + 1;
        for duty in (0..=u32::from(DUTY_FULL_SCALE)).step_by(997) {
            let duty = duty as u16;
            let compare = duty_u16_to_compare(duty, top);
            let back = compare_to_duty_u16(compare, top);
            assert!(back <= duty, "top {top} duty {duty}");
            assert!(
                u32::from(duty) - u32::from(back) <= bound,
                "top {top} duty {duty} back {back}"
            );
        }
    }
}

#[test]
fn half_millisecond_pulse_at_one_khz() {
    // div16 = 32 gives a 62.5 MHz slice rate, so a 1 kHz period with
    // top = 62500 and exact nanosecond round trips.
    assert_eq!(slice_hz(CLK, 32), 62_500_000);
    assert_eq!(duty_ns_to_compare(500_000, CLK, 32), Ok(31_250));
    assert_eq!(compare_to_duty_ns(31_250, CLK, 32), 500_000);
}

#[test]
fn duty_ns_fails_exactly_past_the_compare_range() {
    // At 62.5 MHz a tick is 16 ns; 65535 ticks is 1_048_560 ns.
    assert_eq!(duty_ns_to_compare(1_048_560, CLK, 32), Ok(65_535));
    assert_eq!(
        duty_ns_to_compare(1_048_576, CLK, 32),
        Err(Error::DutyLargerThanPeriod)
    );
}

#[test]
fn absurd_duty_ns_is_rejected_not_wrapped() {
    // Large enough to overflow the 64-bit tick product.
    assert_eq!(
        duty_ns_to_compare(u64::MAX, CLK, 32),
        Err(Error::DutyLargerThanPeriod)
    );
}

#[test]
fn error_messages_match_register_semantics() {
    assert_eq!(format!("{}", Error::FrequencyTooHigh), "freq too large");
    assert_eq!(format!("{}", Error::FrequencyTooLow), "freq too small");
    assert_eq!(
        format!("{}", Error::DutyLargerThanPeriod),
        "duty larger than period"
    );
}
