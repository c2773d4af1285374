//! Indicator waveform generation
//!
//! One logical output level, recomputed every cycle from motor and mode
//! state. Simple mode mirrors the brake position continuously; enhanced
//! mode keeps the output dark and answers switch activity with a timed
//! position preview instead.

use crate::clock::{elapsed_ms, reached};
use crate::settings::BrakePosition;
use crate::switch::{Switch, SwitchState};

/// Toggle period while the motor is moving
pub const LED_FLASH_MS: u32 = 100;
/// Toggle period while boot holds for setup-entry release
pub const LED_SETUP_MS: u32 = 250;
/// Preview hold when the recorded position is Locked
pub const LED_SHOW_LOCKED_MS: u32 = 3000;
/// Preview hold when the recorded position is Released
pub const LED_SHOW_RELEASED_MS: u32 = 500;
/// Press length below which a press is a status query, not a command
pub const SHOW_THRESHOLD_MS: u32 = 400;

/// Everything the waveform depends on this cycle
#[derive(Debug, Clone, Copy)]
pub struct IndicatorCtx {
    /// Boot is flashing for setup-entry release
    pub setup_hold: bool,
    /// Motor running or reversing
    pub motor_active: bool,
    /// Enhanced indication selected (live input)
    pub enhanced: bool,
    pub position: BrakePosition,
    pub switch: SwitchState,
}

/// The indicator state machine
#[derive(Debug, Clone)]
pub struct IndicatorController {
    level: bool,
    next_toggle_at: Option<u32>,
}

impl IndicatorController {
    /// Boot-time state from the restored position
    ///
    /// A restored Locked position shows immediately; the armed timer makes
    /// the boot indication time out in enhanced mode like any other locked
    /// preview (simple mode ignores it and stays solid).
    pub fn new(position: BrakePosition, now_ms: u32) -> Self {
        match position {
            BrakePosition::Locked => Self {
                level: true,
                next_toggle_at: Some(now_ms.wrapping_add(LED_SHOW_LOCKED_MS)),
            },
            BrakePosition::Released => Self {
                level: false,
                next_toggle_at: None,
            },
        }
    }

    pub fn level(&self) -> bool {
        self.level
    }

    /// Drop any armed timer; called whenever the motor starts or stops
    pub fn clear_timer(&mut self) {
        self.next_toggle_at = None;
    }

    /// Recompute the output level for this cycle
    pub fn update(&mut self, ctx: &IndicatorCtx, now_ms: u32) -> bool {
        if ctx.setup_hold {
            self.flash(LED_SETUP_MS, now_ms);
        } else if ctx.motor_active {
            self.flash(LED_FLASH_MS, now_ms);
        } else if !ctx.enhanced {
            self.next_toggle_at = None;
            self.level = ctx.position == BrakePosition::Locked;
        } else {
            self.update_enhanced(ctx, now_ms);
        }
        self.level
    }

    /// Enhanced mode: dark, except a position preview opened by a fresh
    /// press inside the show window; the preview outlives the press and
    /// reverts at its deadline.
    fn update_enhanced(&mut self, ctx: &IndicatorCtx, now_ms: u32) {
        match self.next_toggle_at {
            Some(deadline) if reached(now_ms, deadline) => {
                self.next_toggle_at = None;
                self.level = false;
            }
            Some(_) => {
                self.level = true;
            }
            None => {
                let fresh_press = ctx.switch.switch != Switch::Neutral
                    && elapsed_ms(now_ms, ctx.switch.changed_at_ms) < SHOW_THRESHOLD_MS;
                if fresh_press {
                    let hold = match ctx.position {
                        BrakePosition::Locked => LED_SHOW_LOCKED_MS,
                        BrakePosition::Released => LED_SHOW_RELEASED_MS,
                    };
                    self.next_toggle_at = Some(now_ms.wrapping_add(hold));
                    self.level = true;
                } else {
                    self.level = false;
                }
            }
        }
    }

    fn flash(&mut self, period_ms: u32, now_ms: u32) {
        match self.next_toggle_at {
            Some(at) if !reached(now_ms, at) => {}
            _ => {
                self.level = !self.level;
                self.next_toggle_at = Some(now_ms.wrapping_add(period_ms));
            }
        }
    }
}
