//! Indicator lamp driver
//!
//! The indicator is wired across two complementary outputs; the lamp is
//! lit when the pair is driven apart. Driving both low parks the lamp dark
//! regardless of which leg it returns through.

use shaftlock_hal::OutputPin;

/// Two-terminal indicator behind complementary drive pins
pub struct IndicatorLamp<A, B> {
    anode: A,
    cathode: B,
}

impl<A: OutputPin, B: OutputPin> IndicatorLamp<A, B> {
    /// Take ownership of the pins, lamp dark
    pub fn new(mut anode: A, mut cathode: B) -> Self {
        anode.set_low();
        cathode.set_low();
        Self { anode, cathode }
    }

    /// Drive the lamp to the given logical level
    pub fn set(&mut self, on: bool) {
        if on {
            self.cathode.set_low();
            self.anode.set_high();
        } else {
            self.anode.set_low();
            self.cathode.set_high();
        }
    }
}
