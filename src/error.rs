//! Error types for frequency and duty-cycle setters.

use derive_more::{Display, Error};

/// Result alias using this crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by the frequency and duty setters.
///
/// Getters never fail; they are pure arithmetic over already-valid register
/// contents. A failed setter leaves the previously programmed registers
/// untouched.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Display, Error, defmt::Format)]
#[non_exhaustive]
pub enum Error {
    /// The requested frequency overshoots even with a divisor of 1.0 and the
    /// smallest counter wrap.
    #[display("freq too large")]
    FrequencyTooHigh,

    /// The requested frequency would need a divisor of 256.0 or more, past
    /// the 8-bit integer part of the divider register.
    #[display("freq too small")]
    FrequencyTooLow,

    /// The requested pulse width is longer than the slice's period can
    /// express in its 16-bit compare register.
    #[display("duty larger than period")]
    DutyLargerThanPeriod,
}
