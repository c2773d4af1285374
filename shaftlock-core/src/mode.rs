//! Operating-mode resolution
//!
//! Combines the live select/sense inputs with the confirmed switch state to
//! decide what the motor controller is allowed to do this cycle. The three
//! select inputs are sampled fresh every cycle and never latched; the only
//! latched state here is setup mode (entered during boot) and the one-shot
//! engine auto-release flag.

use crate::clock::elapsed_ms;
use crate::indicator::SHOW_THRESHOLD_MS;
use crate::motor::Direction;
use crate::settings::BrakePosition;
use crate::switch::{Switch, SwitchState};

/// Live external signals, sampled every cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeInputs {
    pub override_selected: bool,
    pub enhanced_indication: bool,
    pub engine_running: bool,
}

/// What the motor controller may do this cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModeDecision {
    /// Run command for this cycle, if any
    pub command: Option<Direction>,
    /// Command is an engine-interlock forced release; bypasses all guards
    pub forced: bool,
    /// Override mode: stop checks suppressed while the originating switch
    /// is held, target-position guard bypassed on start
    pub override_selected: bool,
    /// Setup mode: run while held, stop only on release, learn limits
    pub setup_mode: bool,
}

/// Mode resolver
#[derive(Debug, Clone, Default)]
pub struct ModeResolver {
    setup_mode: bool,
    engine_release_latched: bool,
}

impl ModeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch setup mode; called once from the boot sequence
    pub fn enter_setup(&mut self) {
        self.setup_mode = true;
    }

    pub fn setup_mode(&self) -> bool {
        self.setup_mode
    }

    /// Resolve this cycle's decision
    ///
    /// `releasing` reports whether the motor is already running (or about
    /// to run) toward Release, which gates the engine interlock.
    pub fn resolve(
        &mut self,
        inputs: &ModeInputs,
        switch: SwitchState,
        position: BrakePosition,
        releasing: bool,
        now_ms: u32,
    ) -> ModeDecision {
        if inputs.engine_running {
            // Engine activation ends any calibration session.
            self.setup_mode = false;
        } else {
            // The one-shot flag lives for exactly one engine-on session.
            self.engine_release_latched = false;
        }

        // Engine interlock: a locked shaft must not see engine power.
        if inputs.engine_running
            && position == BrakePosition::Locked
            && !releasing
            && !self.engine_release_latched
        {
            self.engine_release_latched = true;
            return ModeDecision {
                command: Some(Direction::Release),
                forced: true,
                override_selected: inputs.override_selected,
                setup_mode: false,
            };
        }

        let mut command = match switch.switch {
            Switch::Lock => Some(Direction::Lock),
            Switch::Release => Some(Direction::Release),
            Switch::Neutral => None,
        };

        // Enhanced indication: a press inside the show window is a status
        // query, not a run command. Re-evaluated every cycle, so the same
        // press becomes eligible the moment the window passes.
        if inputs.enhanced_indication
            && !self.setup_mode
            && command.is_some()
            && elapsed_ms(now_ms, switch.changed_at_ms) < SHOW_THRESHOLD_MS
        {
            command = None;
        }

        ModeDecision {
            command,
            forced: false,
            override_selected: inputs.override_selected,
            setup_mode: self.setup_mode,
        }
    }
}
