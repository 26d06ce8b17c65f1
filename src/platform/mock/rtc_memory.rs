//! Mock RTC memory implementation for testing
//!
//! Provides an in-memory simulation of the RTC-domain region for unit tests.

use crate::platform::{error::RtcMemoryError, traits::RtcMemoryInterface, Result};

/// Usable region capacity (512 bytes of RTC user memory)
const MOCK_CAPACITY: u32 = 512;

/// Fill pattern for a freshly powered-up region (deliberately not the image
/// magic, so a never-written region reads back as garbage)
const COLD_BOOT_PATTERN: u8 = 0xA5;

/// Mock RTC memory implementation
///
/// Simulates the RTC-domain region in ordinary memory for testing. Supports:
/// - Read/write with bounds checking
/// - Corruption injection for testing validation paths
/// - One-shot read/write fault injection for testing driver failures
/// - Write counting to verify single-write save behavior
///
/// A new instance starts filled with a non-magic garbage pattern, matching
/// what firmware sees after a cold power-up with no prior save.
///
/// # Example
///
/// ```
/// use rtc_state::platform::mock::MockRtcMemory;
/// use rtc_state::platform::traits::RtcMemoryInterface;
///
/// let mut mem = MockRtcMemory::new();
///
/// mem.write(0, &[0x56, 0x43, 0x54, 0x52]).unwrap();
///
/// let mut buf = [0u8; 4];
/// mem.read(0, &mut buf).unwrap();
/// assert_eq!(buf, [0x56, 0x43, 0x54, 0x52]);
/// ```
#[derive(Debug)]
pub struct MockRtcMemory {
    /// Region contents
    storage: [u8; MOCK_CAPACITY as usize],
    /// Fail the next read operation, then clear
    fail_next_read: bool,
    /// Fail the next write operation, then clear
    fail_next_write: bool,
    /// Number of successful writes
    write_count: u32,
}

impl MockRtcMemory {
    /// Create a new mock region in cold-boot state (garbage contents)
    pub fn new() -> Self {
        Self {
            storage: [COLD_BOOT_PATTERN; MOCK_CAPACITY as usize],
            fail_next_read: false,
            fail_next_write: false,
            write_count: 0,
        }
    }

    /// Get region contents (for test verification)
    pub fn contents(&self, offset: u32, len: usize) -> &[u8] {
        &self.storage[offset as usize..offset as usize + len]
    }

    /// Overwrite a range with a corrupt pattern (for testing error recovery)
    pub fn inject_corruption(&mut self, offset: u32, len: usize) {
        for b in &mut self.storage[offset as usize..offset as usize + len] {
            *b = 0xAA;
        }
    }

    /// Invert a single byte, guaranteeing it changes
    pub fn flip_byte(&mut self, offset: u32) {
        self.storage[offset as usize] ^= 0xFF;
    }

    /// Make the next read return a driver error
    pub fn fail_next_read(&mut self) {
        self.fail_next_read = true;
    }

    /// Make the next write return a driver error
    pub fn fail_next_write(&mut self) {
        self.fail_next_write = true;
    }

    /// Number of successful writes since creation
    pub fn write_count(&self) -> u32 {
        self.write_count
    }

    /// Check if a range fits inside the region
    fn in_bounds(&self, offset: u32, len: usize) -> bool {
        (offset as usize)
            .checked_add(len)
            .is_some_and(|end| end <= MOCK_CAPACITY as usize)
    }
}

impl Default for MockRtcMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl RtcMemoryInterface for MockRtcMemory {
    fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<()> {
        if self.fail_next_read {
            self.fail_next_read = false;
            return Err(RtcMemoryError::ReadFailed);
        }

        if !self.in_bounds(offset, buf.len()) {
            return Err(RtcMemoryError::OutOfBounds);
        }

        buf.copy_from_slice(&self.storage[offset as usize..offset as usize + buf.len()]);
        Ok(())
    }

    fn write(&mut self, offset: u32, data: &[u8]) -> Result<()> {
        if self.fail_next_write {
            self.fail_next_write = false;
            return Err(RtcMemoryError::WriteFailed);
        }

        if !self.in_bounds(offset, data.len()) {
            return Err(RtcMemoryError::OutOfBounds);
        }

        self.storage[offset as usize..offset as usize + data.len()].copy_from_slice(data);
        self.write_count += 1;
        Ok(())
    }

    fn capacity(&self) -> u32 {
        MOCK_CAPACITY
    }
}
