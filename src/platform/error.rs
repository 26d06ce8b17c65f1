//! Platform error types
//!
//! This module defines error types for RTC memory operations.

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, RtcMemoryError>;

/// RTC memory access errors
///
/// Platform implementations map their driver-specific errors to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtcMemoryError {
    /// Read operation failed
    ReadFailed,
    /// Write operation failed
    WriteFailed,
    /// Access outside the usable region
    OutOfBounds,
}

impl fmt::Display for RtcMemoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RtcMemoryError::ReadFailed => write!(f, "RTC memory read failed"),
            RtcMemoryError::WriteFailed => write!(f, "RTC memory write failed"),
            RtcMemoryError::OutOfBounds => write!(f, "RTC memory access out of bounds"),
        }
    }
}
