//! Persisted settings: brake position and calibrated limits
//!
//! The record is a fixed 5-byte block with no versioning or checksum;
//! corruption is handled purely by range/enum validation at load. The
//! stored value always reflects the last *completed* motor stop, never an
//! in-progress run.

use shaftlock_hal::{BlockStorage, StorageError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shortest accepted motor run
pub const MIN_RUN_MS: u16 = 500;
/// Longest accepted motor run
pub const MAX_RUN_MS: u16 = 5000;
/// Run duration substituted when the stored value is out of range
pub const DEFAULT_RUN_MS: u16 = 1500;
/// Current limit substituted when no calibrated value is stored
pub const DEFAULT_MAX_CURRENT: u16 = 600;

/// Size of the persisted record
pub const BLOCK_LEN: usize = 5;

const POS_LOCKED: u8 = 1;
const POS_RELEASED: u8 = 2;

/// Mechanical position the brake was last driven to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BrakePosition {
    Locked,
    #[default]
    Released,
}

impl BrakePosition {
    fn code(self) -> u8 {
        match self {
            BrakePosition::Locked => POS_LOCKED,
            BrakePosition::Released => POS_RELEASED,
        }
    }

    fn from_code(code: u8) -> Option<Self> {
        match code {
            POS_LOCKED => Some(BrakePosition::Locked),
            POS_RELEASED => Some(BrakePosition::Released),
            _ => None,
        }
    }
}

/// The three persisted fields
///
/// Mutated exclusively by the motor controller at the instant the motor
/// stops, and written back synchronously at that instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Settings {
    /// Last completed brake position
    pub position: BrakePosition,
    /// Calibrated motor run duration (ms)
    pub run_duration_ms: u16,
    /// Calibrated current stop limit (raw sensor units)
    pub max_current: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            position: BrakePosition::Released,
            run_duration_ms: DEFAULT_RUN_MS,
            max_current: DEFAULT_MAX_CURRENT,
        }
    }
}

impl Settings {
    /// Serialize to the on-storage layout
    ///
    /// `position: u8 {Locked=1, Released=2}`, then `run_duration_ms` and
    /// `max_current` little-endian.
    pub fn to_block(&self) -> [u8; BLOCK_LEN] {
        let run = self.run_duration_ms.to_le_bytes();
        let cur = self.max_current.to_le_bytes();
        [self.position.code(), run[0], run[1], cur[0], cur[1]]
    }

    /// Deserialize from the on-storage layout, substituting defaults
    ///
    /// An unknown position code defaults to Released, an out-of-range run
    /// duration to [`DEFAULT_RUN_MS`]. A zero current limit can only come
    /// from erased or torn storage (calibration samples the loaded motor)
    /// and gets [`DEFAULT_MAX_CURRENT`].
    pub fn from_block(block: &[u8; BLOCK_LEN]) -> Self {
        let position = BrakePosition::from_code(block[0]).unwrap_or_default();

        let run = u16::from_le_bytes([block[1], block[2]]);
        let run_duration_ms = if (MIN_RUN_MS..=MAX_RUN_MS).contains(&run) {
            run
        } else {
            DEFAULT_RUN_MS
        };

        let cur = u16::from_le_bytes([block[3], block[4]]);
        let max_current = if cur == 0 { DEFAULT_MAX_CURRENT } else { cur };

        Self {
            position,
            run_duration_ms,
            max_current,
        }
    }
}

/// Owner of the storage medium behind the settings block
///
/// `load` never fails: a read error is indistinguishable from corruption
/// and yields the defaults. `save` is a plain overwrite with no retry; a
/// power loss mid-write leaves the previous record, which the motor
/// controller's asymmetric lock/release timing self-corrects on subsequent
/// runs.
pub struct SettingsStore<S> {
    storage: S,
}

impl<S: BlockStorage> SettingsStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Load and validate the persisted settings
    pub fn load(&mut self) -> Settings {
        let mut block = [0u8; BLOCK_LEN];
        match self.storage.read(&mut block) {
            Ok(()) => Settings::from_block(&block),
            Err(_) => Settings::default(),
        }
    }

    /// Overwrite the persisted settings
    pub fn save(&mut self, settings: &Settings) -> Result<(), StorageError> {
        self.storage.write(&settings.to_block())
    }
}
