//! Board-agnostic control logic for the Shaftlock brake actuator
//!
//! This crate contains all decision logic that does not depend on specific
//! hardware:
//!
//! - Switch debouncing
//! - Operating-mode resolution (override, setup, engine interlock)
//! - Motor state machine with time and current stop limits
//! - Indicator waveform generation
//! - Settings persistence and load-time validation
//! - The per-cycle orchestrator tying the above together
//!
//! Everything runs inside a single repeatedly-invoked decision cycle driven
//! by a monotonically increasing millisecond clock supplied by the caller.
//! There is no blocking and no interior concurrency; all waiting is a
//! stored-deadline comparison, so tests can drive synthetic time.

#![no_std]
#![deny(unsafe_code)]

pub mod actuator;
pub mod calibration;
pub mod clock;
pub mod indicator;
pub mod mode;
pub mod motor;
pub mod settings;
pub mod switch;

pub use actuator::{Actuator, CycleEvent, CycleInputs, CycleOutputs};
pub use motor::{Direction, MotorOutputs, StopCause};
pub use settings::{BrakePosition, Settings, SettingsStore};
pub use switch::{Switch, SwitchState};
