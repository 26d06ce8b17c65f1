//! Variable registry and persistence engine
//!
//! This module implements the retained-state engine: host code registers
//! references to its live scalar variables, then saves and restores their
//! values through the RTC-domain memory region. The persisted image format
//! lives in [`image`], checksum helpers in [`crc`], and the tagged variable
//! references in [`var`].

pub mod crc;
pub mod engine;
pub mod image;
pub mod var;

pub use engine::{
    LoadError, ReadStatus, RegisterError, RtcState, DEFAULT_MAX_VARIABLES, STATE_ID_INVALID,
};
pub use var::{VarKind, VarRef};
