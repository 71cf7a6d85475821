//! Register math for RP2040-style PWM slices.
//!
//! Maps a requested frequency onto a `(divider, top)` register pair and a
//! requested duty cycle onto a compare value, plus the inverse reads. The
//! divider is a fixed-point value with 4 fractional bits, so raw encodings
//! are "div16": the actual divisor times 16.
//!
//! Everything here is pure integer arithmetic with no hardware dependencies,
//! so it builds and tests on the host.

use crate::{Error, Result};

/// Largest counter wrap value the frequency setter will program.
///
/// Capped one below the register maximum so a compare value of `top + 1`
/// (65535 at most) can still express 100% duty.
pub const TOP_MAX: u16 = 65_534;

/// Smallest valid raw divider encoding: divisor 1.0.
pub const DIV16_MIN: u32 = 16;

/// One past the largest valid raw divider encoding: divisor 256.0.
pub const DIV16_MAX: u32 = 256 * 16;

/// Full-scale normalized duty value (100%).
pub const DUTY_FULL_SCALE: u16 = 65_535;

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Choose a `(div16, top)` register pair for the requested frequency,
/// making `top` as large as possible for maximum duty resolution.
///
/// Greedily pulls factors of 5, 3, then 2 out of the total divisor product
/// `16 * system_hz / freq_hz` into `top`, leaving the remainder in the
/// fractional divider. The factor order is a heuristic that gets close to
/// the request quickly; it does not search for the optimal pair. Factor 2
/// is applied even when the product is odd, truncating, so very low
/// frequencies come out approximate rather than unreachable.
///
/// `system_hz` must stay below 268 MHz to keep `16 * system_hz` in 32 bits;
/// both Pico boards boot well under that.
///
/// # Errors
///
/// [`Error::FrequencyTooHigh`] if even a divisor of 1.0 with `top = 1`
/// overshoots, [`Error::FrequencyTooLow`] if the divisor would reach 256.0.
///
/// # Example
///
/// ```
/// use pwm_envoy::pwm::convert;
///
/// let (div16, top) = convert::frequency_to_registers(125_000_000, 1_000)?;
/// assert_eq!((div16, top), (32, 62_500)); // divisor 2.0
/// # Ok::<(), pwm_envoy::Error>(())
/// ```
pub fn frequency_to_registers(system_hz: u32, freq_hz: u32) -> Result<(u32, u16)> {
    assert!(freq_hz > 0, "requested frequency must be nonzero");
    let mut div16_top = 16 * system_hz / freq_hz;
    let mut top: u32 = 1;
    loop {
        if div16_top >= 16 * 5 && div16_top % 5 == 0 && top * 5 <= u32::from(TOP_MAX) {
            div16_top /= 5;
            top *= 5;
        } else if div16_top >= 16 * 3 && div16_top % 3 == 0 && top * 3 <= u32::from(TOP_MAX) {
            div16_top /= 3;
            top *= 3;
        } else if div16_top >= 16 * 2 && top * 2 <= u32::from(TOP_MAX) {
            div16_top /= 2;
            top *= 2;
        } else {
            break;
        }
    }
    if div16_top < DIV16_MIN {
        Err(Error::FrequencyTooHigh)
    } else if div16_top >= DIV16_MAX {
        Err(Error::FrequencyTooLow)
    } else {
        #[allow(clippy::cast_possible_truncation, reason = "top is capped at TOP_MAX")]
        let top = top as u16;
        Ok((div16_top, top))
    }
}

/// The frequency a consumer observes for the given register pair.
///
/// `16 * system_hz / div16 / top`, truncating. This divides by `top` rather
/// than the physically exact `top + 1`; the off-by-one against the true
/// period is long-standing observable behavior and is kept as-is.
pub fn registers_to_frequency(system_hz: u32, div16: u32, top: u16) -> u32 {
    16 * system_hz / div16 / u32::from(top)
}

/// Compare value for a normalized 16-bit duty against the current `top`.
///
/// `duty * (top + 1) / 65535`. Full scale maps to `top + 1`, which the
/// counter never reaches, giving a constant-high output.
pub fn duty_u16_to_compare(duty: u16, top: u16) -> u16 {
    #[allow(clippy::cast_possible_truncation, reason = "result is at most top + 1")]
    let compare = (u32::from(duty) * (u32::from(top) + 1) / u32::from(DUTY_FULL_SCALE)) as u16;
    compare
}

/// Normalized 16-bit duty for the given compare value: inverse of
/// [`duty_u16_to_compare`], with truncation loss bounded by
/// `65535 / (top + 1)`.
pub fn compare_to_duty_u16(compare: u16, top: u16) -> u16 {
    #[allow(clippy::cast_possible_truncation, reason = "result is at most full scale")]
    let duty = (u32::from(compare) * u32::from(DUTY_FULL_SCALE) / (u32::from(top) + 1)) as u16;
    duty
}

/// Counting rate of a slice in Hz: the system clock after the fixed-point
/// divider, `16 * system_hz / div16`.
pub fn slice_hz(system_hz: u32, div16: u32) -> u32 {
    debug_assert!(
        (DIV16_MIN..DIV16_MAX).contains(&div16),
        "div16 out of hardware range"
    );
    16 * system_hz / div16
}

/// Compare value for a pulse width in nanoseconds at the current divider.
///
/// `duty_ns * slice_hz / 1e9` in 64-bit arithmetic.
///
/// # Errors
///
/// [`Error::DutyLargerThanPeriod`] if the pulse needs more than 65535
/// counter ticks.
pub fn duty_ns_to_compare(duty_ns: u64, system_hz: u32, div16: u32) -> Result<u16> {
    let rate = u64::from(slice_hz(system_hz, div16));
    let compare = duty_ns
        .checked_mul(rate)
        .map(|ticks| ticks / NANOS_PER_SEC)
        .ok_or(Error::DutyLargerThanPeriod)?;
    if compare > u64::from(DUTY_FULL_SCALE) {
        return Err(Error::DutyLargerThanPeriod);
    }
    #[allow(clippy::cast_possible_truncation, reason = "checked against full scale above")]
    let compare = compare as u16;
    Ok(compare)
}

/// Pulse width in nanoseconds for the given compare value: inverse of
/// [`duty_ns_to_compare`], accurate to one slice tick.
pub fn compare_to_duty_ns(compare: u16, system_hz: u32, div16: u32) -> u64 {
    u64::from(compare) * NANOS_PER_SEC / u64::from(slice_hz(system_hz, div16))
}
