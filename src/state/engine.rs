//! Retained-state engine
//!
//! The engine keeps an ordered, fixed-capacity registry of references to
//! host-owned scalars and persists their values to the RTC-domain region as a
//! single validated image.
//!
//! Operation has two phases. During setup the host registers every variable it
//! wants retained, in a fixed order; afterwards it calls
//! [`save_to_rtc`](RtcState::save_to_rtc) and
//! [`load_from_rtc`](RtcState::load_from_rtc) as needed. The image carries no
//! type metadata, so the registration order and kinds must match between the
//! save and the load or validation rejects the image.
//!
//! # Example
//!
//! ```
//! use core::cell::Cell;
//! use rtc_state::platform::mock::MockRtcMemory;
//! use rtc_state::state::RtcState;
//!
//! let reset_counter = Cell::new(0i32);
//! let mut state: RtcState<MockRtcMemory> = RtcState::new(MockRtcMemory::new());
//!
//! state.register(&reset_counter).unwrap();
//!
//! if state.load_from_rtc().is_err() {
//!     // Cold boot or invalid image: keep defaults
//!     reset_counter.set(0);
//! }
//! reset_counter.set(reset_counter.get() + 1);
//! state.save_to_rtc().unwrap();
//! ```

use crate::platform::{self, RtcMemoryInterface};
use crate::state::crc::{calculate_crc32, validate_crc32};
use crate::state::image::{
    ImageHeader, CRC_SIZE, HEADER_SIZE, IMAGE_BASE_OFFSET, IMAGE_OVERHEAD, RTC_USER_MEM_SIZE,
};
use crate::state::var::VarRef;
use crate::{log_debug, log_warn};

/// Default registry capacity in variable slots
pub const DEFAULT_MAX_VARIABLES: usize = 32;

/// Reserved state id reported when no valid image is present
pub const STATE_ID_INVALID: u8 = 255;

/// Registration failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    /// All variable slots are taken
    RegistryFull,
    /// Image would no longer fit in the region
    RegionFull,
}

/// Load validation failure
///
/// Variants carry the fixed status codes reported by
/// [`ReadStatus::code`]; the numeric values are part of the external contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadError {
    /// Magic marker missing: the region holds garbage (code 1)
    BadMagic,
    /// Stored payload size differs from the registered set (code 2)
    SizeMismatch,
    /// Region read rejected by the driver (code 3)
    ReadFailed,
    /// CRC mismatch: bit-level corruption (code 4)
    BadChecksum,
    /// Stored state id differs from the expected one (code 5)
    StateIdMismatch,
    /// Any other failure (code 99)
    Other,
}

impl LoadError {
    /// Fixed numeric status code
    pub const fn code(self) -> u8 {
        match self {
            LoadError::BadMagic => 1,
            LoadError::SizeMismatch => 2,
            LoadError::ReadFailed => 3,
            LoadError::BadChecksum => 4,
            LoadError::StateIdMismatch => 5,
            LoadError::Other => 99,
        }
    }
}

/// Outcome of the most recent [`RtcState::load_from_rtc`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadStatus {
    /// Load succeeded (code 0)
    Ok,
    /// Load failed at the recorded validation step
    Failed(LoadError),
}

impl ReadStatus {
    /// Fixed numeric status code (0 for success)
    pub const fn code(self) -> u8 {
        match self {
            ReadStatus::Ok => 0,
            ReadStatus::Failed(e) => e.code(),
        }
    }
}

/// Variable registry with RTC-memory persistence
///
/// `MAX_VARS` bounds the number of registrable variables; the byte capacity of
/// the underlying region bounds their cumulative serialized size. Both are
/// checked at registration time so a successful registration guarantees the
/// image fits.
pub struct RtcState<'v, M: RtcMemoryInterface, const MAX_VARS: usize = DEFAULT_MAX_VARIABLES> {
    /// RTC memory backend
    memory: M,
    /// Registered variables, in serialization order
    vars: heapless::Vec<VarRef<'v>, MAX_VARS>,
    /// Cumulative serialized size of the registered variables
    payload_size: usize,
    /// State id the next save embeds and the next load expects
    state_id: u8,
    /// State id recovered by the last successful load
    last_read_state_id: u8,
    /// Outcome of the most recent load
    last_read_status: ReadStatus,
}

impl<'v, M: RtcMemoryInterface, const MAX_VARS: usize> RtcState<'v, M, MAX_VARS> {
    /// Create a new engine with an empty registry
    pub fn new(memory: M) -> Self {
        Self {
            memory,
            vars: heapless::Vec::new(),
            payload_size: 0,
            state_id: 0,
            last_read_state_id: STATE_ID_INVALID,
            last_read_status: ReadStatus::Ok,
        }
    }

    /// Register a host variable for retention
    ///
    /// Accepts a shared reference to any supported scalar `Cell`; the host
    /// keeps the storage alive while the engine holds the reference. Order of
    /// registration defines serialization order and must be repeated exactly
    /// on the load side.
    ///
    /// # Errors
    ///
    /// Fails without changing the registry if all `MAX_VARS` slots are taken
    /// or the image would exceed the region's capacity.
    pub fn register(&mut self, var: impl Into<VarRef<'v>>) -> Result<(), RegisterError> {
        let var = var.into();

        if self.vars.is_full() {
            return Err(RegisterError::RegistryFull);
        }

        let new_payload = self.payload_size + var.width();
        if IMAGE_OVERHEAD + new_payload > self.usable_capacity() {
            return Err(RegisterError::RegionFull);
        }

        self.vars.push(var).map_err(|_| RegisterError::RegistryFull)?;
        self.payload_size = new_payload;
        Ok(())
    }

    /// Save all registered variables to the region
    ///
    /// Builds the full image (header, payload in registration order, trailing
    /// CRC32) and writes it in a single operation at the base offset. The
    /// image bytes are fully determined by the registered values and the
    /// current state id, so repeated saves of unchanged values are
    /// byte-identical.
    ///
    /// # Errors
    ///
    /// Propagates the driver error if the region rejects the write; the image
    /// consistency is undefined in that case until the next successful save.
    pub fn save_to_rtc(&mut self) -> platform::Result<()> {
        let mut buf = [0u8; RTC_USER_MEM_SIZE];

        let header = ImageHeader::new(self.payload_size as u16, self.state_id);
        buf[..HEADER_SIZE].copy_from_slice(&header.to_bytes());

        let mut offset = HEADER_SIZE;
        for var in &self.vars {
            let width = var.width();
            var.read_value_into(&mut buf[offset..offset + width]);
            offset += width;
        }

        let crc = calculate_crc32(&buf[..offset]);
        buf[offset..offset + CRC_SIZE].copy_from_slice(&crc.to_le_bytes());

        self.memory.write(IMAGE_BASE_OFFSET, &buf[..offset + CRC_SIZE])
    }

    /// Load and validate the stored image, restoring registered variables
    ///
    /// Validation short-circuits at the first failure, in this order: region
    /// read, magic marker, payload size against the registered set, CRC32,
    /// state id. Only when every check passes are the payload bytes copied
    /// back into the registered variables, in registration order; on any
    /// failure the variables keep whatever values they held before the call.
    ///
    /// The outcome is also recorded for [`read_status`](Self::read_status).
    pub fn load_from_rtc(&mut self) -> Result<(), LoadError> {
        match self.validate_and_restore() {
            Ok(state_id) => {
                self.last_read_state_id = state_id;
                self.last_read_status = ReadStatus::Ok;
                Ok(())
            }
            Err(e) => {
                log_warn!("state image rejected with status {}", e.code());
                self.last_read_status = ReadStatus::Failed(e);
                Err(e)
            }
        }
    }

    fn validate_and_restore(&mut self) -> Result<u8, LoadError> {
        let mut buf = [0u8; RTC_USER_MEM_SIZE];

        self.memory
            .read(IMAGE_BASE_OFFSET, &mut buf[..HEADER_SIZE])
            .map_err(|_| LoadError::ReadFailed)?;

        let header = ImageHeader::from_bytes(&buf[..HEADER_SIZE]).ok_or(LoadError::Other)?;
        if !header.is_valid() {
            return Err(LoadError::BadMagic);
        }

        if header.payload_size as usize != self.payload_size {
            return Err(LoadError::SizeMismatch);
        }

        let payload_end = HEADER_SIZE + self.payload_size;
        self.memory
            .read(
                IMAGE_BASE_OFFSET + HEADER_SIZE as u32,
                &mut buf[HEADER_SIZE..payload_end + CRC_SIZE],
            )
            .map_err(|_| LoadError::ReadFailed)?;

        let stored_crc = u32::from_le_bytes([
            buf[payload_end],
            buf[payload_end + 1],
            buf[payload_end + 2],
            buf[payload_end + 3],
        ]);
        if !validate_crc32(&buf[..payload_end], stored_crc) {
            return Err(LoadError::BadChecksum);
        }

        if header.state_id != self.state_id {
            return Err(LoadError::StateIdMismatch);
        }

        // All checks passed: restore values in registration order
        let mut offset = HEADER_SIZE;
        for var in &self.vars {
            let width = var.width();
            var.write_value_from(&buf[offset..offset + width]);
            offset += width;
        }

        Ok(header.state_id)
    }

    /// Outcome of the most recent load
    pub fn read_status(&self) -> ReadStatus {
        self.last_read_status
    }

    /// State id the next save will embed
    pub fn state_id(&self) -> u8 {
        self.state_id
    }

    /// Set the state id for subsequent saves and loads
    ///
    /// Valid ids are 0-254; [`STATE_ID_INVALID`] (255) is reserved for
    /// reporting the absence of a valid image.
    pub fn set_state_id(&mut self, state_id: u8) {
        self.state_id = state_id;
    }

    /// State id recovered by the last successful load
    pub fn last_read_state_id(&self) -> u8 {
        self.last_read_state_id
    }

    /// Peek the state id stored in the region
    ///
    /// Reads only the header and checks the magic marker, without size, CRC,
    /// or state-id validation. Lets the host branch on the stored phase before
    /// deciding whether to attempt a full load. Returns [`STATE_ID_INVALID`]
    /// if the region is unreadable or holds no image.
    pub fn state_id_from_rtc(&mut self) -> u8 {
        let mut buf = [0u8; HEADER_SIZE];
        if self.memory.read(IMAGE_BASE_OFFSET, &mut buf).is_err() {
            return STATE_ID_INVALID;
        }

        match ImageHeader::from_bytes(&buf) {
            Some(header) if header.is_valid() => header.state_id,
            _ => STATE_ID_INVALID,
        }
    }

    /// Remaining byte capacity for further registrations
    pub fn free_memory(&self) -> usize {
        self.usable_capacity()
            .saturating_sub(IMAGE_OVERHEAD + self.payload_size)
    }

    /// Remaining variable slots
    pub fn free_slots(&self) -> usize {
        MAX_VARS - self.vars.len()
    }

    /// Number of registered variables
    pub fn var_count(&self) -> usize {
        self.vars.len()
    }

    /// Serialized size of the registered variables in bytes
    pub fn payload_size(&self) -> usize {
        self.payload_size
    }

    /// Access the memory backend
    pub fn memory(&self) -> &M {
        &self.memory
    }

    /// Mutable access to the memory backend
    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    /// Consume the engine, returning the memory backend
    pub fn into_memory(self) -> M {
        self.memory
    }

    /// Log registry contents and current values
    pub fn debug_dump(&self) {
        log_debug!(
            "{} registered variables, {} payload bytes, state id {}",
            self.vars.len(),
            self.payload_size,
            self.state_id
        );
        for (index, var) in self.vars.iter().enumerate() {
            match var {
                VarRef::Int(c) => log_debug!("  [{}] int = {}", index, c.get()),
                VarRef::Long(c) => log_debug!("  [{}] long = {}", index, c.get()),
                VarRef::Float(c) => log_debug!("  [{}] float = {}", index, c.get()),
                VarRef::Byte(c) => log_debug!("  [{}] byte = {}", index, c.get()),
                VarRef::Char(c) => log_debug!("  [{}] char = {}", index, c.get()),
            }
        }
    }

    fn usable_capacity(&self) -> usize {
        core::cmp::min(self.memory.capacity() as usize, RTC_USER_MEM_SIZE)
    }
}

impl<'v, M: RtcMemoryInterface + Default, const MAX_VARS: usize> Default
    for RtcState<'v, M, MAX_VARS>
{
    fn default() -> Self {
        Self::new(M::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockRtcMemory;
    use core::cell::Cell;

    #[test]
    fn test_register_accounting() {
        let a = Cell::new(1i32);
        let b = Cell::new(2i64);
        let c = Cell::new(3u8);
        let mut state: RtcState<MockRtcMemory> = RtcState::new(MockRtcMemory::new());

        assert_eq!(state.var_count(), 0);
        assert_eq!(state.payload_size(), 0);

        state.register(&a).unwrap();
        state.register(&b).unwrap();
        state.register(&c).unwrap();

        assert_eq!(state.var_count(), 3);
        assert_eq!(state.payload_size(), 4 + 8 + 1);
        assert_eq!(state.free_slots(), DEFAULT_MAX_VARIABLES - 3);
    }

    #[test]
    fn test_free_memory_accounts_for_overhead() {
        let a = Cell::new(0i32);
        let mut state: RtcState<MockRtcMemory> = RtcState::new(MockRtcMemory::new());

        let capacity = state.memory().capacity() as usize;
        assert_eq!(state.free_memory(), capacity - IMAGE_OVERHEAD);

        state.register(&a).unwrap();
        assert_eq!(state.free_memory(), capacity - IMAGE_OVERHEAD - 4);
    }

    #[test]
    fn test_slot_capacity_rejection() {
        let cells: [Cell<u8>; 3] = [Cell::new(0), Cell::new(1), Cell::new(2)];
        let mut state: RtcState<MockRtcMemory, 2> = RtcState::new(MockRtcMemory::new());

        state.register(&cells[0]).unwrap();
        state.register(&cells[1]).unwrap();

        let count_before = state.var_count();
        let size_before = state.payload_size();
        assert_eq!(
            state.register(&cells[2]),
            Err(RegisterError::RegistryFull)
        );
        assert_eq!(state.var_count(), count_before);
        assert_eq!(state.payload_size(), size_before);
    }

    #[test]
    fn test_initial_read_status_is_ok() {
        let state: RtcState<MockRtcMemory> = RtcState::new(MockRtcMemory::new());
        assert_eq!(state.read_status().code(), 0);
        assert_eq!(state.last_read_state_id(), STATE_ID_INVALID);
    }

    #[test]
    fn test_status_codes_are_contract_values() {
        assert_eq!(ReadStatus::Ok.code(), 0);
        assert_eq!(LoadError::BadMagic.code(), 1);
        assert_eq!(LoadError::SizeMismatch.code(), 2);
        assert_eq!(LoadError::ReadFailed.code(), 3);
        assert_eq!(LoadError::BadChecksum.code(), 4);
        assert_eq!(LoadError::StateIdMismatch.code(), 5);
        assert_eq!(LoadError::Other.code(), 99);
        assert_eq!(STATE_ID_INVALID, 255);
    }

    #[test]
    fn test_state_id_round_trip() {
        let mut state: RtcState<MockRtcMemory> = RtcState::new(MockRtcMemory::new());

        assert_eq!(state.state_id(), 0);
        state.set_state_id(42);
        assert_eq!(state.state_id(), 42);
    }

    #[test]
    fn test_debug_dump_does_not_modify_state() {
        let a = Cell::new(7i32);
        let f = Cell::new(2.5f32);
        let mut state: RtcState<MockRtcMemory> = RtcState::new(MockRtcMemory::new());
        state.register(&a).unwrap();
        state.register(&f).unwrap();

        state.debug_dump();

        assert_eq!(a.get(), 7);
        assert_eq!(f.get(), 2.5);
        assert_eq!(state.var_count(), 2);
    }
}
