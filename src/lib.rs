#![cfg_attr(not(test), no_std)]

//! rtc-state - RTC-memory retained variable registry
//!
//! This library lets firmware preserve a small set of scalar variables across
//! a processor reset or deep-sleep cycle by serializing them into an RTC-domain
//! memory region. The region survives a warm reset but is cleared by full power
//! loss, so every load validates the stored image (magic, size, checksum, state
//! id) before touching any registered variable.

// Platform abstraction layer (RTC memory access)
pub mod platform;

// Variable registry and persistence engine
pub mod state;

// Logging abstraction (defmt on target, println! in host tests)
pub mod logging;

// Re-export the public surface
pub use platform::{RtcMemoryError, RtcMemoryInterface};
pub use state::{
    LoadError, ReadStatus, RegisterError, RtcState, VarKind, VarRef, DEFAULT_MAX_VARIABLES,
    STATE_ID_INVALID,
};
