//! Board adapters
//!
//! Wraps embassy-rp GPIO and ADC types behind the `shaftlock-hal` traits so
//! the drivers and core stay board-agnostic.

use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::gpio::{Input, Output};

use shaftlock_hal::{AnalogSource, InputPin, OutputPin};

/// Digital input behind the HAL trait
pub struct BoardInput<'d>(pub Input<'d>);

impl InputPin for BoardInput<'_> {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Digital output behind the HAL trait
pub struct BoardOutput<'d>(pub Output<'d>);

impl OutputPin for BoardOutput<'_> {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}

/// Motor current sense on an ADC channel
pub struct CurrentSense<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
}

impl<'d> CurrentSense<'d> {
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>) -> Self {
        Self { adc, channel }
    }
}

impl AnalogSource for CurrentSense<'_> {
    fn read(&mut self) -> u16 {
        // A failed conversion reads as zero magnitude; current is only a
        // stop condition, so the cycle must not stall on it.
        self.adc.blocking_read(&mut self.channel).unwrap_or(0)
    }
}
