//! A device abstraction for one PWM slice output channel.
//!
//! This module provides frequency and duty-cycle control for a PWM output,
//! with duty expressed either as a normalized 16-bit fraction or as a pulse
//! width in nanoseconds. See [`PwmOutput`] for usage examples.
//!
//! The underlying register math is in [`convert`] and is usable on its own.

pub mod convert;

#[cfg(any(feature = "pico1", feature = "pico2"))]
mod output;

#[cfg(any(feature = "pico1", feature = "pico2"))]
pub use output::PwmOutput;
