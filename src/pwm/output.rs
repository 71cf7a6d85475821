use core::convert::Infallible;

use defmt::info;
use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};
use fixed::FixedU16;
use fixed::types::extra::U4;

use crate::Result;
use crate::pwm::convert;

/// Frequency and duty-cycle control for one PWM slice output channel.
///
/// Setting a frequency reprograms the slice's divider and top registers
/// together, keeping `top` as large as possible for maximum duty resolution.
/// Setting a duty scales it against the currently programmed `top` (or the
/// slice's counting rate for the nanosecond form) and enables the slice.
///
/// Each `PwmOutput` owns its slice's config, so two outputs on the same
/// slice cannot be driven independently; the A and B channels of a slice
/// always share one period.
///
/// # Examples
/// ```rust,no_run
/// # #![no_std]
/// # #![no_main]
/// use pwm_envoy::pwm::PwmOutput;
/// # use core::panic::PanicInfo;
/// # #[panic_handler]
/// # fn panic(_info: &PanicInfo) -> ! { loop {} }
/// fn example(p: embassy_rp::Peripherals) -> pwm_envoy::Result<()> {
///     // GPIO 15 is the B channel of PWM slice 7.
///     let pwm = embassy_rp::pwm::Pwm::new_output_b(
///         p.PWM_SLICE7,
///         p.PIN_15,
///         embassy_rp::pwm::Config::default(),
///     );
///     let mut out = PwmOutput::new_output_b(pwm);
///
///     out.set_frequency(1_000)?; // 1 kHz
///     out.set_duty_u16(32_768);  // ~50%
///     out.set_duty_ns(250_000)?; // 250 µs pulse
///     out.disable();
///     Ok(())
/// }
/// ```
pub struct PwmOutput<'d> {
    pwm: Pwm<'d>,
    cfg: Config, // Store config to avoid recreating default (which resets divider)
    channel: PwmChannel,
}

#[derive(Clone, Copy, Debug, defmt::Format)]
enum PwmChannel {
    A,
    B,
}

impl<'d> PwmOutput<'d> {
    /// Create a converter on a PWM output A channel.
    ///
    /// See the [struct-level example](Self) for usage.
    pub fn new_output_a(pwm: Pwm<'d>) -> Self {
        Self::init(pwm, PwmChannel::A)
    }

    /// Create a converter on a PWM output B channel.
    ///
    /// See the [struct-level example](Self) for usage.
    pub fn new_output_b(pwm: Pwm<'d>) -> Self {
        Self::init(pwm, PwmChannel::B)
    }

    fn init(pwm: Pwm<'d>, channel: PwmChannel) -> Self {
        Self {
            pwm,
            cfg: Config::default(),
            channel,
        }
    }

    /// Program the slice for the requested frequency in Hz.
    ///
    /// Divider and top are applied in a single register update so duty math
    /// never sees a half-written pair. The achieved frequency is as close to
    /// the request as the greedy factoring in
    /// [`convert::frequency_to_registers`] gets; read it back with
    /// [`frequency`](Self::frequency).
    ///
    /// # Errors
    ///
    /// [`crate::Error::FrequencyTooHigh`] / [`crate::Error::FrequencyTooLow`]
    /// when the request falls outside the divider's range. The previously
    /// programmed registers are left untouched.
    pub fn set_frequency(&mut self, freq_hz: u32) -> Result<()> {
        let system_hz = clk_sys_freq();
        let (div16, top) = convert::frequency_to_registers(system_hz, freq_hz)?;
        #[allow(clippy::cast_possible_truncation, reason = "div16 < 4096")]
        let divider = FixedU16::<U4>::from_bits(div16 as u16);
        self.cfg.divider = divider;
        self.cfg.top = top;
        self.pwm.set_config(&self.cfg);
        info!("pwm clk={}Hz div16={} top={}", system_hz, div16, top);
        Ok(())
    }

    /// The currently programmed frequency in Hz, recomputed from the live
    /// system clock and register values on every call.
    pub fn frequency(&self) -> u32 {
        convert::registers_to_frequency(clk_sys_freq(), self.div16(), self.cfg.top)
    }

    /// Set the duty cycle as a fraction of full scale (65535 = 100%) and
    /// enable the slice.
    ///
    /// Taking `u16` makes out-of-range input unrepresentable; no runtime
    /// check is needed.
    pub fn set_duty_u16(&mut self, duty: u16) {
        let compare = convert::duty_u16_to_compare(duty, self.cfg.top);
        self.set_compare(compare);
    }

    /// The duty cycle as a fraction of full scale (65535 = 100%).
    pub fn duty_u16(&self) -> u16 {
        convert::compare_to_duty_u16(self.compare(), self.cfg.top)
    }

    /// Set the duty cycle as a pulse width in nanoseconds and enable the
    /// slice.
    ///
    /// # Errors
    ///
    /// [`crate::Error::DutyLargerThanPeriod`] if the pulse does not fit the
    /// slice's period; the compare register is left untouched.
    pub fn set_duty_ns(&mut self, duty_ns: u64) -> Result<()> {
        let compare = convert::duty_ns_to_compare(duty_ns, clk_sys_freq(), self.div16())?;
        self.set_compare(compare);
        Ok(())
    }

    /// The duty cycle as a pulse width in nanoseconds.
    pub fn duty_ns(&self) -> u64 {
        convert::compare_to_duty_ns(self.compare(), clk_sys_freq(), self.div16())
    }

    /// Stop the slice's counter, freezing both of its outputs.
    pub fn disable(&mut self) {
        self.cfg.enable = false;
        self.pwm.set_config(&self.cfg);
    }

    /// Resume the slice's counter.
    ///
    /// The duty setters do this implicitly.
    pub fn enable(&mut self) {
        self.cfg.enable = true;
        self.pwm.set_config(&self.cfg);
    }

    /// Raw divider encoding currently programmed (divisor times 16).
    fn div16(&self) -> u32 {
        u32::from(self.cfg.divider.to_bits())
    }

    fn compare(&self) -> u16 {
        match self.channel {
            PwmChannel::A => self.cfg.compare_a,
            PwmChannel::B => self.cfg.compare_b,
        }
    }

    // NOTE: only update the *compare* register path of the stored config;
    // the divider and top survive because the config is reapplied whole.
    fn set_compare(&mut self, compare: u16) {
        match self.channel {
            PwmChannel::A => self.cfg.compare_a = compare,
            PwmChannel::B => self.cfg.compare_b = compare,
        }
        self.cfg.enable = true;
        self.pwm.set_config(&self.cfg);
    }
}

impl embedded_hal::pwm::ErrorType for PwmOutput<'_> {
    type Error = Infallible;
}

impl embedded_hal::pwm::SetDutyCycle for PwmOutput<'_> {
    fn max_duty_cycle(&self) -> u16 {
        convert::DUTY_FULL_SCALE
    }

    fn set_duty_cycle(&mut self, duty: u16) -> core::result::Result<(), Self::Error> {
        self.set_duty_u16(duty);
        Ok(())
    }
}
