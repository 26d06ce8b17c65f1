//! CRC32 calculation for persisted image validation
//!
//! This module provides CRC32 checksum calculation for detecting corrupted
//! state images in RTC memory.

use crc::{Crc, CRC_32_ISO_HDLC};

/// CRC32 algorithm (ISO HDLC / Ethernet / ZIP)
const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Calculate CRC32 checksum of data
///
/// Uses the CRC-32-ISO-HDLC algorithm (polynomial 0x04C11DB7).
///
/// # Example
///
/// ```
/// use rtc_state::state::crc::calculate_crc32;
///
/// let checksum = calculate_crc32(b"retained state");
/// assert_ne!(checksum, 0);
/// ```
pub fn calculate_crc32(data: &[u8]) -> u32 {
    CRC32.checksum(data)
}

/// Validate data against a CRC32 checksum
///
/// Returns `true` if the checksum matches.
pub fn validate_crc32(data: &[u8], expected_crc: u32) -> bool {
    calculate_crc32(data) == expected_crc
}
