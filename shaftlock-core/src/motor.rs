//! Brake motor state machine
//!
//! Starts, monitors, and stops the reversible motor. A run ends on its time
//! deadline or on the current limit (after the inrush ignore window), both
//! suppressed while override mode holds the originating switch. Setup-mode
//! runs ignore both limits and stop only when the switch releases, learning
//! a new limit on the way out. Every stop, whatever its cause, commits the
//! new brake position into the settings; the caller persists them the same
//! cycle.

use crate::calibration::{self, Learned};
use crate::clock::{elapsed_ms, reached};
use crate::mode::ModeDecision;
use crate::settings::{BrakePosition, Settings};
use crate::switch::{Switch, SwitchState};

/// Extra margin a Lock run gets on top of the calibrated duration
///
/// Mechanical resistance rises as the pads seat, and the torn-write
/// recovery story depends on lock runs always outlasting release runs.
pub const EXTRA_LOCK_MS: u32 = 500;
/// Dead time between de-energizing one polarity and energizing the other
pub const REVERSE_SETTLE_MS: u32 = 50;
/// Inrush window during which the current limit is not evaluated
pub const CURRENT_SENSE_DELAY_MS: u32 = 200;

/// Motor travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Lock,
    Release,
}

impl Direction {
    /// Brake position this direction drives toward
    pub fn target(self) -> BrakePosition {
        match self {
            Direction::Lock => BrakePosition::Locked,
            Direction::Release => BrakePosition::Released,
        }
    }

    /// Whether `switch` is the half that commands this direction
    pub fn engages(self, switch: Switch) -> bool {
        matches!(
            (self, switch),
            (Direction::Lock, Switch::Lock) | (Direction::Release, Switch::Release)
        )
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopCause {
    /// Stop deadline reached
    TimeLimit,
    /// Sensed current exceeded the limit
    OverCurrent,
    /// Setup-mode run: the held switch released
    SwitchReleased,
    /// Interrupted by a command in the opposite direction
    Superseded,
}

/// Levels for the three motor output lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorOutputs {
    pub enable: bool,
    pub lock: bool,
    pub release: bool,
}

impl MotorOutputs {
    pub const OFF: Self = Self {
        enable: false,
        lock: false,
        release: false,
    };
}

/// A completed stop, reported to the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stopped {
    pub direction: Direction,
    pub cause: StopCause,
    /// Limit learned by a setup-mode run, already applied to the settings
    pub learned: Option<Learned>,
}

/// Run state, owned exclusively by the motor controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum RunState {
    Idle,
    /// Polarity-reversal dead time; outputs off until `at_ms`
    Reversing { next: Direction, at_ms: u32 },
    Running {
        dir: Direction,
        started_at_ms: u32,
        deadline_ms: u32,
    },
}

/// What one update did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotorUpdate {
    pub started: Option<Direction>,
    pub stopped: Option<Stopped>,
}

/// The brake-motor state machine
#[derive(Debug, Clone)]
pub struct MotorController {
    state: RunState,
}

impl Default for MotorController {
    fn default() -> Self {
        Self::new()
    }
}

impl MotorController {
    pub fn new() -> Self {
        Self {
            state: RunState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == RunState::Idle
    }

    /// Direction the motor is running, or committed to run, toward
    pub fn commanded_direction(&self) -> Option<Direction> {
        match self.state {
            RunState::Idle => None,
            RunState::Reversing { next, .. } => Some(next),
            RunState::Running { dir, .. } => Some(dir),
        }
    }

    /// Current levels for the motor output lines
    pub fn outputs(&self) -> MotorOutputs {
        match self.state {
            RunState::Running { dir, .. } => MotorOutputs {
                enable: true,
                lock: dir == Direction::Lock,
                release: dir == Direction::Release,
            },
            _ => MotorOutputs::OFF,
        }
    }

    /// Advance the state machine by one decision cycle
    pub fn update(
        &mut self,
        decision: &ModeDecision,
        switch: SwitchState,
        settings: &mut Settings,
        current: u16,
        now_ms: u32,
    ) -> MotorUpdate {
        let mut update = MotorUpdate::default();

        // Reversal dead time: hold everything off until the settle deadline,
        // then energize the latched direction. An engine-forced release may
        // retarget the pending direction; nothing else can.
        if let RunState::Reversing { mut next, at_ms } = self.state {
            if decision.forced {
                if let Some(d) = decision.command {
                    next = d;
                    self.state = RunState::Reversing { next, at_ms };
                }
            }
            if reached(now_ms, at_ms) {
                self.start(next, settings, now_ms);
                update.started = Some(next);
            }
            return update;
        }

        if let Some(d) = decision.command {
            match self.state {
                RunState::Idle => {
                    // Normal mode refuses to re-run toward the recorded
                    // position; override, setup, and forced runs do not.
                    let guarded = !decision.forced
                        && !decision.override_selected
                        && !decision.setup_mode
                        && settings.position == d.target();
                    if !guarded {
                        self.start(d, settings, now_ms);
                        update.started = Some(d);
                        return update;
                    }
                }
                RunState::Running { dir, .. } if dir != d => {
                    // Stop through the common path, then wait out the dead
                    // time before energizing the opposite polarity.
                    update.stopped =
                        Some(self.stop(dir, StopCause::Superseded, None, settings));
                    self.state = RunState::Reversing {
                        next: d,
                        at_ms: now_ms.wrapping_add(REVERSE_SETTLE_MS),
                    };
                    return update;
                }
                _ => {}
            }
        }

        if let RunState::Running {
            dir,
            started_at_ms,
            deadline_ms,
        } = self.state
        {
            if decision.setup_mode {
                // Calibration run: no time or current limit, stop when the
                // held switch returns to neutral and learn from the run.
                if switch.switch == Switch::Neutral {
                    let learned =
                        calibration::learn(dir, elapsed_ms(now_ms, started_at_ms), current);
                    calibration::apply(learned, settings);
                    update.stopped =
                        Some(self.stop(dir, StopCause::SwitchReleased, Some(learned), settings));
                }
            } else {
                // Override with the originating switch still held suppresses
                // both stop checks; they re-arm the cycle the switch drops.
                let held = decision.override_selected && dir.engages(switch.switch);
                if !held {
                    if reached(now_ms, deadline_ms) {
                        update.stopped =
                            Some(self.stop(dir, StopCause::TimeLimit, None, settings));
                    } else if current > settings.max_current
                        && elapsed_ms(now_ms, started_at_ms) >= CURRENT_SENSE_DELAY_MS
                    {
                        update.stopped =
                            Some(self.stop(dir, StopCause::OverCurrent, None, settings));
                    }
                }
            }
        }

        update
    }

    fn start(&mut self, dir: Direction, settings: &Settings, now_ms: u32) {
        let mut run_ms = settings.run_duration_ms as u32;
        if dir == Direction::Lock {
            run_ms += EXTRA_LOCK_MS;
        }
        self.state = RunState::Running {
            dir,
            started_at_ms: now_ms,
            deadline_ms: now_ms.wrapping_add(run_ms),
        };
    }

    fn stop(
        &mut self,
        dir: Direction,
        cause: StopCause,
        learned: Option<Learned>,
        settings: &mut Settings,
    ) -> Stopped {
        self.state = RunState::Idle;
        settings.position = dir.target();
        Stopped {
            direction: dir,
            cause,
            learned,
        }
    }
}
