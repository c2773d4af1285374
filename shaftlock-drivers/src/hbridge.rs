//! H-bridge motor output driver
//!
//! Maps the core's three logical motor lines onto the bridge's enable and
//! direction pins. Direction lines settle before enable rises and enable
//! drops before direction lines change, so the bridge never sees a live
//! polarity swap.

use shaftlock_core::motor::MotorOutputs;
use shaftlock_hal::OutputPin;

/// Reversible motor bridge behind enable + two direction pins
pub struct HBridge<E, L, R> {
    enable: E,
    lock: L,
    release: R,
}

impl<E: OutputPin, L: OutputPin, R: OutputPin> HBridge<E, L, R> {
    /// Take ownership of the pins, all driven low
    pub fn new(mut enable: E, mut lock: L, mut release: R) -> Self {
        enable.set_low();
        lock.set_low();
        release.set_low();
        Self {
            enable,
            lock,
            release,
        }
    }

    /// Apply one cycle's output levels
    pub fn apply(&mut self, outputs: &MotorOutputs) {
        if outputs.enable {
            self.lock.set_state(outputs.lock);
            self.release.set_state(outputs.release);
            self.enable.set_high();
        } else {
            self.enable.set_low();
            self.lock.set_low();
            self.release.set_low();
        }
    }

    /// Drop everything, unconditionally
    pub fn disengage(&mut self) {
        self.apply(&MotorOutputs::OFF);
    }
}
