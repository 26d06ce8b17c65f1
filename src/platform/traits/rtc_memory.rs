//! RTC memory interface trait
//!
//! This module defines the RTC-domain memory interface that platform
//! implementations must provide. The region is used for retaining state
//! across warm resets and deep-sleep cycles.

use crate::platform::Result;

/// RTC memory interface trait
///
/// Platform implementations must provide this interface for read/write access
/// to the RTC-domain memory region.
///
/// # Region Characteristics
///
/// - The region is byte-addressable RAM in the RTC power domain, typically a
///   few hundred bytes of usable capacity
/// - Contents survive a warm reset and deep-sleep wake-up
/// - Contents are lost (undefined) after full power loss; a cold boot leaves
///   arbitrary bytes in the region
/// - Unlike flash there is no erase cycle; writes are plain overwrites
///
/// # Safety Invariants
///
/// - Only one owner per region instance (no concurrent access)
/// - Offsets are relative to the start of the usable region, not to any
///   system-reserved area preceding it
pub trait RtcMemoryInterface {
    /// Read data from the region
    ///
    /// Reads `buf.len()` bytes starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`RtcMemoryError::OutOfBounds`] if the range exceeds the usable
    /// capacity, or [`RtcMemoryError::ReadFailed`] if the driver rejects the
    /// read.
    ///
    /// [`RtcMemoryError::OutOfBounds`]: crate::platform::error::RtcMemoryError::OutOfBounds
    /// [`RtcMemoryError::ReadFailed`]: crate::platform::error::RtcMemoryError::ReadFailed
    fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<()>;

    /// Write data to the region
    ///
    /// Writes `data` starting at `offset`, overwriting previous contents.
    ///
    /// # Errors
    ///
    /// Returns [`RtcMemoryError::OutOfBounds`] if the range exceeds the usable
    /// capacity, or [`RtcMemoryError::WriteFailed`] if the driver rejects the
    /// write.
    ///
    /// [`RtcMemoryError::OutOfBounds`]: crate::platform::error::RtcMemoryError::OutOfBounds
    /// [`RtcMemoryError::WriteFailed`]: crate::platform::error::RtcMemoryError::WriteFailed
    fn write(&mut self, offset: u32, data: &[u8]) -> Result<()>;

    /// Get usable region capacity in bytes
    fn capacity(&self) -> u32;
}
