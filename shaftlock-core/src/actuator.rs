//! The per-cycle orchestrator
//!
//! A single context struct owns every piece of mutable state (debouncer,
//! mode resolver, motor, indicator, settings) and threads one decision
//! cycle through them: debounce, resolve mode, update the motor, update the
//! indicator, persist settings at motor-stop boundaries. The caller samples
//! the inputs, invokes [`Actuator::cycle`], and applies the outputs.
//!
//! Boot runs through explicit phases instead of blocking: `BootProbe`
//! watches whether Release is held through the setup settle delay, and
//! `BootHold` flashes the indicator until the held input drops. Switch
//! samples are not debounced during boot, so the entry hold never turns
//! into a motor command.

use heapless::Vec;

use shaftlock_hal::{BlockStorage, StorageError};

use crate::calibration::{Learned, SETUP_ENTRY_MS};
use crate::clock::reached;
use crate::indicator::{IndicatorController, IndicatorCtx};
use crate::mode::{ModeInputs, ModeResolver};
use crate::motor::{Direction, MotorController, MotorOutputs, StopCause};
use crate::settings::{Settings, SettingsStore};
use crate::switch::{Debouncer, Switch};

/// Most events one cycle can produce
pub const MAX_CYCLE_EVENTS: usize = 4;

/// One cycle's sampled inputs
///
/// Digital levels arrive polarity-corrected (true = asserted); `now_ms` is
/// the environment's monotonic millisecond clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleInputs {
    pub lock_switch: bool,
    pub release_switch: bool,
    pub override_selected: bool,
    pub enhanced_indication: bool,
    pub engine_running: bool,
    pub motor_current: u16,
    pub now_ms: u32,
}

/// One cycle's computed outputs
#[derive(Debug, Clone)]
pub struct CycleOutputs {
    pub motor: MotorOutputs,
    pub indicator: bool,
    pub events: Vec<CycleEvent, MAX_CYCLE_EVENTS>,
}

/// Notable things a cycle did, for the caller's log
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CycleEvent {
    /// Debouncer confirmed a switch change
    SwitchChanged(Switch),
    /// Boot latched setup mode
    SetupEntered,
    /// Engine interlock forced a release
    AutoRelease,
    MotorStarted(Direction),
    MotorStopped { direction: Direction, cause: StopCause },
    /// Setup run learned a new limit
    CalibrationLearned(Learned),
    /// The settings write after a stop failed; the run itself completed
    SaveFailed(StorageError),
}

/// Boot sequencing; `Run` is the normal decision cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Watching whether Release is held through the setup settle delay
    BootProbe { until_ms: u32 },
    /// Setup latched; flashing until the held Release drops
    BootHold,
    Run,
}

/// The complete actuator state, threaded through each decision cycle
pub struct Actuator<S> {
    phase: Phase,
    settings: Settings,
    store: SettingsStore<S>,
    debouncer: Debouncer,
    mode: ModeResolver,
    motor: MotorController,
    indicator: IndicatorController,
}

impl<S: BlockStorage> Actuator<S> {
    /// Load settings and start the boot sequence
    pub fn new(storage: S, now_ms: u32) -> Self {
        let mut store = SettingsStore::new(storage);
        let settings = store.load();
        Self {
            phase: Phase::BootProbe {
                until_ms: now_ms.wrapping_add(SETUP_ENTRY_MS),
            },
            indicator: IndicatorController::new(settings.position, now_ms),
            settings,
            store,
            debouncer: Debouncer::new(),
            mode: ModeResolver::new(),
            motor: MotorController::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn setup_mode(&self) -> bool {
        self.mode.setup_mode()
    }

    /// Boot sequencing finished
    pub fn booted(&self) -> bool {
        self.phase == Phase::Run
    }

    /// Run one decision cycle
    pub fn cycle(&mut self, inputs: &CycleInputs) -> CycleOutputs {
        let now = inputs.now_ms;
        let mut events: Vec<CycleEvent, MAX_CYCLE_EVENTS> = Vec::new();

        match self.phase {
            Phase::BootProbe { until_ms } => {
                // Raw sample, deliberately undebounced: setup entry watches
                // the held level itself through the settle delay.
                if !inputs.release_switch {
                    self.phase = Phase::Run;
                } else if reached(now, until_ms) {
                    self.mode.enter_setup();
                    let _ = events.push(CycleEvent::SetupEntered);
                    self.phase = Phase::BootHold;
                }
                return CycleOutputs {
                    motor: MotorOutputs::OFF,
                    indicator: self.indicator.level(),
                    events,
                };
            }
            Phase::BootHold => {
                if !inputs.release_switch {
                    self.phase = Phase::Run;
                }
                let ctx = IndicatorCtx {
                    setup_hold: true,
                    motor_active: false,
                    enhanced: inputs.enhanced_indication,
                    position: self.settings.position,
                    switch: self.debouncer.state(),
                };
                let indicator = self.indicator.update(&ctx, now);
                return CycleOutputs {
                    motor: MotorOutputs::OFF,
                    indicator,
                    events,
                };
            }
            Phase::Run => {}
        }

        if let Some(edge) = self.debouncer.update(inputs.lock_switch, inputs.release_switch, now)
        {
            let _ = events.push(CycleEvent::SwitchChanged(edge.switch));
        }
        let switch = self.debouncer.state();

        let mode_inputs = ModeInputs {
            override_selected: inputs.override_selected,
            enhanced_indication: inputs.enhanced_indication,
            engine_running: inputs.engine_running,
        };
        let releasing = self.motor.commanded_direction() == Some(Direction::Release);
        let decision = self.mode.resolve(
            &mode_inputs,
            switch,
            self.settings.position,
            releasing,
            now,
        );
        if decision.forced {
            let _ = events.push(CycleEvent::AutoRelease);
        }

        let update = self.motor.update(
            &decision,
            switch,
            &mut self.settings,
            inputs.motor_current,
            now,
        );
        if let Some(direction) = update.started {
            let _ = events.push(CycleEvent::MotorStarted(direction));
            self.indicator.clear_timer();
        }
        if let Some(stopped) = update.stopped {
            if let Some(learned) = stopped.learned {
                let _ = events.push(CycleEvent::CalibrationLearned(learned));
            }
            let _ = events.push(CycleEvent::MotorStopped {
                direction: stopped.direction,
                cause: stopped.cause,
            });
            // The synchronous persist at the stop boundary. A failure is
            // reported and otherwise absorbed; the in-memory settings stay
            // authoritative for this power session.
            if let Err(e) = self.store.save(&self.settings) {
                let _ = events.push(CycleEvent::SaveFailed(e));
            }
            self.indicator.clear_timer();
        }

        let ctx = IndicatorCtx {
            setup_hold: false,
            motor_active: !self.motor.is_idle(),
            enhanced: inputs.enhanced_indication,
            position: self.settings.position,
            switch,
        };
        let indicator = self.indicator.update(&ctx, now);

        CycleOutputs {
            motor: self.motor.outputs(),
            indicator,
            events,
        }
    }
}
