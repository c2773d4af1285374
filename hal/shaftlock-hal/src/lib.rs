//! Shaftlock Hardware Abstraction Layer
//!
//! This crate defines the trait boundary between the brake-actuator control
//! logic and the hardware it runs on. Chip-specific implementations (the
//! RP2040 firmware, test mocks) provide the actual register access.
//!
//! # Traits
//!
//! - [`gpio::InputPin`], [`gpio::OutputPin`] - Digital I/O
//! - [`adc::AnalogSource`] - Motor current magnitude
//! - [`storage::BlockStorage`] - Nonvolatile settings block
//!
//! Input polarity is part of the hardware contract (the switch and select
//! inputs are active-low, engine-run is active-high), so the polarity
//! wrappers [`gpio::ActiveLow`] and [`gpio::ActiveHigh`] live here as well.

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod storage;

// Re-export key traits at crate root for convenience
pub use adc::AnalogSource;
pub use gpio::{ActiveHigh, ActiveLow, InputPin, OutputPin};
pub use storage::{BlockStorage, StorageError};
