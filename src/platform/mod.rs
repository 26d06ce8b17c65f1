//! Platform abstraction layer
//!
//! This module provides the hardware abstraction for RTC-domain memory access.
//! The engine in [`crate::state`] only ever touches the region through the
//! [`RtcMemoryInterface`] trait, so it can run against an in-memory fake on a
//! host as well as against real RTC user memory on target.

pub mod error;
pub mod traits;

// In-memory fake region for host testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{Result, RtcMemoryError};
pub use traits::RtcMemoryInterface;
