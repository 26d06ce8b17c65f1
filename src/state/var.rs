//! Tagged variable references
//!
//! The engine stores non-owning references to host-owned scalars. Each
//! registered variable is a [`VarRef`]: a sum type over the supported scalar
//! kinds, holding a shared [`Cell`] reference so the engine can write restored
//! values back without reinterpreting raw pointers. The host keeps the `Cell`s
//! alive for as long as the engine holds them; the engine never allocates or
//! frees variable storage.

use core::cell::Cell;

/// Scalar kind tags
///
/// Tag value 0 is reserved; the wire widths are fixed regardless of the
/// target's native C type sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum VarKind {
    /// 32-bit signed integer
    Int = 1,
    /// 64-bit signed integer
    Long = 2,
    /// 32-bit floating point
    Float = 3,
    /// Unsigned byte
    Byte = 4,
    /// Signed byte
    Char = 5,
}

impl VarKind {
    /// Serialized width in bytes
    pub const fn width(self) -> usize {
        match self {
            VarKind::Int => 4,
            VarKind::Long => 8,
            VarKind::Float => 4,
            VarKind::Byte => 1,
            VarKind::Char => 1,
        }
    }
}

/// Non-owning typed reference to a host-owned scalar
#[derive(Debug, Clone, Copy)]
pub enum VarRef<'v> {
    /// Reference to a 32-bit signed integer
    Int(&'v Cell<i32>),
    /// Reference to a 64-bit signed integer
    Long(&'v Cell<i64>),
    /// Reference to a 32-bit float
    Float(&'v Cell<f32>),
    /// Reference to an unsigned byte
    Byte(&'v Cell<u8>),
    /// Reference to a signed byte
    Char(&'v Cell<i8>),
}

impl VarRef<'_> {
    /// Kind tag of the referenced scalar
    pub fn kind(&self) -> VarKind {
        match self {
            VarRef::Int(_) => VarKind::Int,
            VarRef::Long(_) => VarKind::Long,
            VarRef::Float(_) => VarKind::Float,
            VarRef::Byte(_) => VarKind::Byte,
            VarRef::Char(_) => VarKind::Char,
        }
    }

    /// Serialized width in bytes
    pub fn width(&self) -> usize {
        self.kind().width()
    }

    /// Copy the current value into `out`, little-endian
    ///
    /// `out` must be exactly [`width`](Self::width) bytes long.
    pub fn read_value_into(&self, out: &mut [u8]) {
        debug_assert_eq!(out.len(), self.width());
        match self {
            VarRef::Int(c) => out.copy_from_slice(&c.get().to_le_bytes()),
            VarRef::Long(c) => out.copy_from_slice(&c.get().to_le_bytes()),
            VarRef::Float(c) => out.copy_from_slice(&c.get().to_le_bytes()),
            VarRef::Byte(c) => out[0] = c.get(),
            VarRef::Char(c) => out[0] = c.get() as u8,
        }
    }

    /// Store little-endian `bytes` back into the host variable
    ///
    /// `bytes` must be exactly [`width`](Self::width) bytes long.
    pub fn write_value_from(&self, bytes: &[u8]) {
        debug_assert_eq!(bytes.len(), self.width());
        match self {
            VarRef::Int(c) => c.set(i32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])),
            VarRef::Long(c) => c.set(i64::from_le_bytes([
                bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
            ])),
            VarRef::Float(c) => {
                c.set(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
            }
            VarRef::Byte(c) => c.set(bytes[0]),
            VarRef::Char(c) => c.set(bytes[0] as i8),
        }
    }
}

impl<'v> From<&'v Cell<i32>> for VarRef<'v> {
    fn from(cell: &'v Cell<i32>) -> Self {
        VarRef::Int(cell)
    }
}

impl<'v> From<&'v Cell<i64>> for VarRef<'v> {
    fn from(cell: &'v Cell<i64>) -> Self {
        VarRef::Long(cell)
    }
}

impl<'v> From<&'v Cell<f32>> for VarRef<'v> {
    fn from(cell: &'v Cell<f32>) -> Self {
        VarRef::Float(cell)
    }
}

impl<'v> From<&'v Cell<u8>> for VarRef<'v> {
    fn from(cell: &'v Cell<u8>) -> Self {
        VarRef::Byte(cell)
    }
}

impl<'v> From<&'v Cell<i8>> for VarRef<'v> {
    fn from(cell: &'v Cell<i8>) -> Self {
        VarRef::Char(cell)
    }
}
