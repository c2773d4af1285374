//! Settings block storage on RP2040 on-chip flash
//!
//! The block lives in the last 4 KiB sector of the 2 MB part, well clear of
//! the firmware image. A save erases the sector and programs one page; no
//! wear leveling and no journaling, exactly the plain-overwrite semantics
//! the control logic's recovery behavior depends on.

use embassy_rp::flash::{Blocking, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;

use shaftlock_hal::{BlockStorage, StorageError};

/// Total flash size on the target board
pub const FLASH_SIZE: usize = 2 * 1024 * 1024;
/// Offset of the settings sector (last erase unit)
pub const SETTINGS_OFFSET: u32 = (FLASH_SIZE - ERASE_SIZE) as u32;

const PAGE_SIZE: usize = 256;

/// The settings sector behind the `BlockStorage` trait
pub struct SettingsFlash<'d> {
    flash: Flash<'d, FLASH, Blocking, FLASH_SIZE>,
}

impl<'d> SettingsFlash<'d> {
    pub fn new(flash: Peri<'d, FLASH>) -> Self {
        Self {
            flash: Flash::new_blocking(flash),
        }
    }
}

impl BlockStorage for SettingsFlash<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<(), StorageError> {
        if buf.len() > PAGE_SIZE {
            return Err(StorageError::BadLength);
        }
        self.flash
            .blocking_read(SETTINGS_OFFSET, buf)
            .map_err(|_| StorageError::Read)
    }

    fn write(&mut self, data: &[u8]) -> Result<(), StorageError> {
        if data.len() > PAGE_SIZE {
            return Err(StorageError::BadLength);
        }

        // Program a whole page, erased-pattern padded
        let mut page = [0xFFu8; PAGE_SIZE];
        page[..data.len()].copy_from_slice(data);

        self.flash
            .blocking_erase(SETTINGS_OFFSET, SETTINGS_OFFSET + ERASE_SIZE as u32)
            .map_err(|_| StorageError::Write)?;
        self.flash
            .blocking_write(SETTINGS_OFFSET, &page)
            .map_err(|_| StorageError::Write)
    }
}
