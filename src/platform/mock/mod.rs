//! Mock platform implementation for host testing

pub mod rtc_memory;

pub use rtc_memory::MockRtcMemory;
