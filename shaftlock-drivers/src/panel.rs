//! Control panel sampling
//!
//! Bundles the five digital inputs with the polarities they are wired
//! with: the switch halves and the two mode selects pull to ground when
//! asserted, the engine-run sense is active-high. Sampling produces the
//! polarity-corrected levels the decision cycle consumes.

use shaftlock_core::actuator::CycleInputs;
use shaftlock_hal::{ActiveHigh, ActiveLow, InputPin};

/// The operator-facing inputs
pub struct ControlPanel<L, R, O, I, E> {
    lock: ActiveLow<L>,
    release: ActiveLow<R>,
    override_select: ActiveLow<O>,
    indication_select: ActiveLow<I>,
    engine: ActiveHigh<E>,
}

impl<L, R, O, I, E> ControlPanel<L, R, O, I, E>
where
    L: InputPin,
    R: InputPin,
    O: InputPin,
    I: InputPin,
    E: InputPin,
{
    /// Wire up the panel
    ///
    /// The lock and release pins belong to one physical three-position
    /// switch; they can never both be closed. The debouncer relies on that
    /// exclusivity.
    pub fn new(lock: L, release: R, override_select: O, indication_select: I, engine: E) -> Self {
        Self {
            lock: ActiveLow::new(lock),
            release: ActiveLow::new(release),
            override_select: ActiveLow::new(override_select),
            indication_select: ActiveLow::new(indication_select),
            engine: ActiveHigh::new(engine),
        }
    }

    /// Sample everything into one cycle's inputs
    pub fn sample(&self, motor_current: u16, now_ms: u32) -> CycleInputs {
        CycleInputs {
            lock_switch: self.lock.is_active(),
            release_switch: self.release.is_active(),
            override_selected: self.override_select.is_active(),
            enhanced_indication: self.indication_select.is_active(),
            engine_running: self.engine.is_active(),
            motor_current,
            now_ms,
        }
    }
}
