// Tue Apr 14 2026 - Alex

use crate::error::ModelError;
use crate::memory::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Compressed heap reference: a 32-bit base-relative, shifted encoding of
/// an object address. Deliberately opaque; it only becomes an address
/// through a CompressedEncoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct NarrowOop(u32);

impl NarrowOop {
    pub const NULL: NarrowOop = NarrowOop(0);

    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NarrowOop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "narrow:0x{:08x}", self.0)
    }
}

/// Compressed class-descriptor reference, the metaspace analogue of
/// NarrowOop with its own base and shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct NarrowKlass(u32);

impl NarrowKlass {
    pub const NULL: NarrowKlass = NarrowKlass(0);

    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NarrowKlass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "narrowk:0x{:08x}", self.0)
    }
}

/// base/shift parameters for one compressed-reference space. These come
/// from the target process (flags or dump metadata), never from this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedEncoding {
    pub base: u64,
    pub shift: u32,
}

impl CompressedEncoding {
    pub fn new(base: u64, shift: u32) -> Self {
        Self { base, shift }
    }

    /// Zero-based encoding (small heaps below 4G*scale need no base).
    pub fn zero_based(shift: u32) -> Self {
        Self { base: 0, shift }
    }

    pub fn decode_raw(&self, raw: u32) -> Address {
        Address::new(self.base + ((raw as u64) << self.shift))
    }

    /// Encoding rejects anything the 32-bit window cannot hold exactly:
    /// below-base addresses, offsets that lose bits to the shift, and
    /// offsets past the shifted 32-bit span. Null maps to null.
    pub fn encode_raw(&self, addr: Address) -> Result<u32, ModelError> {
        if addr.is_null() {
            return Ok(0);
        }
        let value = addr.as_u64();
        if value < self.base {
            return Err(ModelError::Unrepresentable(value));
        }
        let delta = value - self.base;
        if delta & ((1u64 << self.shift) - 1) != 0 {
            return Err(ModelError::Unrepresentable(value));
        }
        let shifted = delta >> self.shift;
        if shifted > u32::MAX as u64 {
            return Err(ModelError::Unrepresentable(value));
        }
        Ok(shifted as u32)
    }

    pub fn decode_oop(&self, narrow: NarrowOop) -> Address {
        if narrow.is_null() {
            Address::zero()
        } else {
            self.decode_raw(narrow.raw())
        }
    }

    pub fn encode_oop(&self, addr: Address) -> Result<NarrowOop, ModelError> {
        Ok(NarrowOop::from_raw(self.encode_raw(addr)?))
    }

    pub fn decode_klass(&self, narrow: NarrowKlass) -> Address {
        if narrow.is_null() {
            Address::zero()
        } else {
            self.decode_raw(narrow.raw())
        }
    }

    pub fn encode_klass(&self, addr: Address) -> Result<NarrowKlass, ModelError> {
        Ok(NarrowKlass::from_raw(self.encode_raw(addr)?))
    }

    /// Highest address the window reaches, exclusive.
    pub fn max_address(&self) -> u64 {
        self.base + ((u32::MAX as u64) << self.shift) + (1u64 << self.shift)
    }
}
