//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod rtc_memory;

// Re-export trait interfaces
pub use rtc_memory::RtcMemoryInterface;
