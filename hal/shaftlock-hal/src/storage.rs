//! Nonvolatile block storage abstraction
//!
//! The persisted settings live in a single fixed-size block. The interface
//! is deliberately minimal: one read, one overwriting write, no retry and
//! no transactional guarantee. A write interrupted by power loss leaves the
//! previous block in place; the control logic's recovery behavior depends
//! on exactly that, so implementations must not add their own journaling.

/// Errors from block storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// The medium failed to read
    Read,
    /// The medium failed to erase or program
    Write,
    /// The caller's buffer does not match the block size
    BadLength,
}

/// Fixed-size nonvolatile block storage
pub trait BlockStorage {
    /// Read the settings block into `buf`
    ///
    /// `buf.len()` is the block size the caller expects; implementations
    /// return [`StorageError::BadLength`] if they cannot supply exactly
    /// that many bytes. Reading a never-written medium is not an error:
    /// the erased pattern is returned and the caller's validation handles
    /// it.
    fn read(&mut self, buf: &mut [u8]) -> Result<(), StorageError>;

    /// Overwrite the settings block with `data`
    fn write(&mut self, data: &[u8]) -> Result<(), StorageError>;
}
