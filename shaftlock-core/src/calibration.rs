//! Setup-mode calibration
//!
//! Setup mode is entered by holding Release through the boot settle delay.
//! While it is active the motor runs for as long as a switch is held, and
//! the limits are learned from the run itself: a held Release run teaches
//! the travel time, a held Lock run teaches the current drawn with the pads
//! seated.

use crate::motor::Direction;
use crate::settings::{Settings, MAX_RUN_MS, MIN_RUN_MS};

/// How long Release must be held from power-on to enter setup mode
pub const SETUP_ENTRY_MS: u32 = 1000;

/// A limit derived from a completed calibration run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Learned {
    /// New run duration (ms), from a held Release run
    RunDuration(u16),
    /// New current stop limit (sensor units), from a held Lock run
    CurrentLimit(u16),
}

/// Derive the learned limit for a calibration run that just ended
///
/// `elapsed_ms` is the full held duration, `current` the sensor reading at
/// the release instant.
pub fn learn(direction: Direction, elapsed_ms: u32, current: u16) -> Learned {
    match direction {
        Direction::Release => Learned::RunDuration(clamp_run(elapsed_ms)),
        Direction::Lock => Learned::CurrentLimit(current),
    }
}

/// Apply a learned limit to the settings
pub fn apply(learned: Learned, settings: &mut Settings) {
    match learned {
        Learned::RunDuration(ms) => settings.run_duration_ms = ms,
        Learned::CurrentLimit(limit) => settings.max_current = limit,
    }
}

fn clamp_run(elapsed_ms: u32) -> u16 {
    elapsed_ms.clamp(MIN_RUN_MS as u32, MAX_RUN_MS as u32) as u16
}
