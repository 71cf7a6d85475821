//! Frequency and duty-cycle control for the PWM slices on the Pico 1 and 2.
//!
//! # Glossary
//!
//! PWM ([Pulse Width Modulation](https://en.wikipedia.org/wiki/Pulse-width_modulation))
//! resources on the Pico 1 and Pico 2:
//!
//! - **Slice:** one hardware timer unit with a shared counter, clock divider,
//!   and wrap-around value ("top"). Pico 1 has 8 slices, Pico 2 has 12. These
//!   "slices" are unrelated to Rust slices.
//! - **Channel:** one of two independent compare/output paths within a slice
//!   ("A" and "B"). The output is high while the counter is below the
//!   channel's compare value.
//! - **Divider:** fixed-point (4 fractional bits) divisor applied to the
//!   system clock before the counter increments.
//!
//! The register math lives in [`pwm::convert`] and builds on any host. The
//! [`pwm::PwmOutput`] device abstraction requires the `pico1` or `pico2`
//! feature.
#![no_std]

// Compile-time check: at most one board may be selected.
#[cfg(all(feature = "pico1", feature = "pico2"))]
compile_error!("Cannot enable both 'pico1' and 'pico2' features simultaneously");

mod error;
pub mod pwm;

// Re-export error types and result (used throughout)
pub use crate::error::{Error, Result};
