//! Hardware adapters for the Shaftlock brake actuator
//!
//! Concrete glue between the `shaftlock-hal` pin traits and the core's
//! cycle inputs/outputs:
//!
//! - Control panel sampling (switch halves and mode selects, with their
//!   wired polarities)
//! - H-bridge motor output driver
//! - Indicator lamp with complementary outputs

#![no_std]
#![deny(unsafe_code)]

pub mod hbridge;
pub mod lamp;
pub mod panel;

pub use hbridge::HBridge;
pub use lamp::IndicatorLamp;
pub use panel::ControlPanel;
