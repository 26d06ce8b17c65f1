//! Persisted image format
//!
//! This module defines the binary format of the state image written to RTC
//! memory. The image is a fixed header, the concatenated variable values in
//! registration order, and a trailing CRC32.
//!
//! # Image Format
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ Magic: u32 = 0x52544356 ("RTCV")             │  Offset: 0
//! ├───────────────────────────────────────────────┤
//! │ Payload size: u16                             │  Offset: 4
//! ├───────────────────────────────────────────────┤
//! │ State id: u8                                  │  Offset: 6
//! ├───────────────────────────────────────────────┤
//! │ Reserved: u8 = 0                              │  Offset: 7
//! ├───────────────────────────────────────────────┤
//! │ Payload: variable values, registration order  │  Offset: 8
//! ├───────────────────────────────────────────────┤
//! │ CRC32 over header + payload: u32              │  Offset: 8 + payload
//! └───────────────────────────────────────────────┘
//! ```
//!
//! All multi-byte fields are little-endian. The image carries no per-variable
//! type metadata; only the registrant's order, kinds, and widths define how
//! the payload bytes are reinterpreted on load.

/// Image magic number (ASCII "RTCV")
pub const IMAGE_MAGIC: u32 = 0x5254_4356;

/// Size of the image header in bytes
pub const HEADER_SIZE: usize = 8;

/// Size of the trailing CRC32 field in bytes
pub const CRC_SIZE: usize = 4;

/// Fixed bytes an image occupies beyond its payload
pub const IMAGE_OVERHEAD: usize = HEADER_SIZE + CRC_SIZE;

/// Fixed base offset of the image within the region
pub const IMAGE_BASE_OFFSET: u32 = 0;

/// Largest region the engine will address (512 bytes of RTC user memory)
pub const RTC_USER_MEM_SIZE: usize = 512;

/// State image header
///
/// Stored at the base offset of the region, ahead of the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    /// Magic number (0x52544356 = "RTCV")
    pub magic: u32,
    /// Payload size in bytes
    pub payload_size: u16,
    /// State discriminator set by the host at save time
    pub state_id: u8,
    /// Reserved, always written as 0
    pub reserved: u8,
}

impl ImageHeader {
    /// Size of header in bytes
    pub const SIZE: usize = HEADER_SIZE;

    /// Create a new header
    pub fn new(payload_size: u16, state_id: u8) -> Self {
        Self {
            magic: IMAGE_MAGIC,
            payload_size,
            state_id,
            reserved: 0,
        }
    }

    /// Serialize header to bytes (little-endian)
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf[0..4].copy_from_slice(&self.magic.to_le_bytes());
        buf[4..6].copy_from_slice(&self.payload_size.to_le_bytes());
        buf[6] = self.state_id;
        buf[7] = self.reserved;
        buf
    }

    /// Deserialize header from bytes (little-endian)
    ///
    /// Parses unconditionally; callers check [`is_valid`](Self::is_valid) to
    /// distinguish a garbage region from a real image. Returns `None` only if
    /// `buf` is too short.
    pub fn from_bytes(buf: &[u8]) -> Option<Self> {
        if buf.len() < Self::SIZE {
            return None;
        }

        Some(Self {
            magic: u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
            payload_size: u16::from_le_bytes([buf[4], buf[5]]),
            state_id: buf[6],
            reserved: buf[7],
        })
    }

    /// Check if the magic marker identifies a saved image
    pub fn is_valid(&self) -> bool {
        self.magic == IMAGE_MAGIC
    }
}
