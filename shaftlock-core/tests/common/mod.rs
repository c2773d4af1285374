//! Shared test fixtures: inspectable in-memory storage and a small
//! cycle-driving harness with a 10 ms synthetic clock.

use std::cell::RefCell;
use std::rc::Rc;

use shaftlock_core::actuator::{Actuator, CycleEvent, CycleInputs, CycleOutputs};
use shaftlock_core::settings::{Settings, BLOCK_LEN};
use shaftlock_hal::{BlockStorage, StorageError};

pub const TICK_MS: u32 = 10;

/// Block storage whose contents stay visible to the test after the
/// actuator takes ownership
#[derive(Clone)]
pub struct SharedStorage(Rc<RefCell<[u8; BLOCK_LEN]>>);

impl SharedStorage {
    pub fn erased() -> Self {
        Self(Rc::new(RefCell::new([0xFF; BLOCK_LEN])))
    }

    pub fn with(settings: &Settings) -> Self {
        Self(Rc::new(RefCell::new(settings.to_block())))
    }

    pub fn block(&self) -> [u8; BLOCK_LEN] {
        *self.0.borrow()
    }

    pub fn stored(&self) -> Settings {
        Settings::from_block(&self.block())
    }
}

impl BlockStorage for SharedStorage {
    fn read(&mut self, buf: &mut [u8]) -> Result<(), StorageError> {
        if buf.len() != BLOCK_LEN {
            return Err(StorageError::BadLength);
        }
        buf.copy_from_slice(&*self.0.borrow());
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), StorageError> {
        if data.len() != BLOCK_LEN {
            return Err(StorageError::BadLength);
        }
        self.0.borrow_mut().copy_from_slice(data);
        Ok(())
    }
}

/// Drives an [`Actuator`] with held input levels and a stepped clock
pub struct Sim {
    pub actuator: Actuator<SharedStorage>,
    pub storage: SharedStorage,
    pub inputs: CycleInputs,
    pub now: u32,
}

impl Sim {
    /// Construct at t=0 and step once so an unheld boot lands in `Run`
    pub fn booted(storage: SharedStorage) -> Self {
        let mut sim = Self {
            actuator: Actuator::new(storage.clone(), 0),
            storage,
            inputs: CycleInputs::default(),
            now: 0,
        };
        sim.step();
        assert!(sim.actuator.booted());
        sim
    }

    /// Run one cycle at the current time, then advance the clock
    pub fn step(&mut self) -> CycleOutputs {
        self.inputs.now_ms = self.now;
        let out = self.actuator.cycle(&self.inputs);
        self.now += TICK_MS;
        out
    }

    /// Step for `ms`, collecting every event
    pub fn run_ms(&mut self, ms: u32) -> Vec<CycleEvent> {
        let mut events = Vec::new();
        for _ in 0..ms / TICK_MS {
            events.extend(self.step().events);
        }
        events
    }

    /// Step until `pred` matches an event or `limit_ms` elapses; returns
    /// the time of the match
    pub fn run_until(
        &mut self,
        limit_ms: u32,
        pred: impl Fn(&CycleEvent) -> bool,
    ) -> Option<u32> {
        for _ in 0..limit_ms / TICK_MS {
            let at = self.now;
            if self.step().events.iter().any(&pred) {
                return Some(at);
            }
        }
        None
    }
}
