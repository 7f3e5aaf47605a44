// Thu Apr 16 2026 - Alex

use crate::error::Result;
use crate::image::RuntimeImage;
use crate::memory::Address;
use std::fmt;

const TY: &str = "Symbol";

/// Reference count value marking a symbol as permanent (never freed);
/// VM-intrinsic and shared-archive symbols carry it.
pub const PERMANENT_REFCOUNT: u16 = 0xffff;

/// Interned, immutable byte string used for names and signatures. The
/// declared body is two bytes; the real body runs `length` bytes in the
/// same allocation.
#[derive(Clone, Copy)]
pub struct SymbolRef<'img> {
    image: &'img RuntimeImage,
    addr: Address,
}

impl<'img> SymbolRef<'img> {
    pub(crate) fn new(image: &'img RuntimeImage, addr: Address) -> Self {
        Self { image, addr }
    }

    pub fn address(&self) -> Address {
        self.addr
    }

    fn hash_and_refcount(&self) -> Result<u32> {
        self.image.read_u32_field(TY, "_hash_and_ref", self.addr)
    }

    /// Interning-table hash, the high half of the packed word.
    pub fn hash(&self) -> Result<u16> {
        Ok((self.hash_and_refcount()? >> 16) as u16)
    }

    /// Reference count, the low half of the packed word.
    pub fn refcount(&self) -> Result<u16> {
        Ok((self.hash_and_refcount()? & 0xffff) as u16)
    }

    pub fn is_permanent(&self) -> Result<bool> {
        Ok(self.refcount()? == PERMANENT_REFCOUNT)
    }

    pub fn length(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "length", self.addr)
    }

    /// The exact body bytes.
    pub fn bytes(&self) -> Result<Vec<u8>> {
        let length = self.length()? as usize;
        let body = self.image.field_addr(TY, "body", self.addr)?;
        Ok(self.image.reader().read_bytes(body, length)?)
    }

    pub fn byte_at(&self, index: usize) -> Result<u8> {
        let length = self.length()? as usize;
        if index >= length {
            return Err(crate::error::ModelError::BoundsViolation { index, length });
        }
        let body = self.image.field_addr(TY, "body", self.addr)?;
        Ok(self.image.reader().read_u8(body + index as u64)?)
    }

    /// Lossy UTF-8 rendering; names are modified-UTF-8 in the target, so
    /// exotic constant names may not round-trip. Use bytes() for fidelity.
    pub fn as_string(&self) -> Result<String> {
        Ok(String::from_utf8_lossy(&self.bytes()?).into_owned())
    }

    pub fn equals(&self, text: &str) -> Result<bool> {
        Ok(self.bytes()? == text.as_bytes())
    }

    /// Allocation footprint: header, body and tail padding to word size.
    pub fn byte_size(&self) -> Result<u64> {
        let body_offset = self.image.profile().offset_of(TY, "body")?;
        let raw = body_offset + self.length()? as u64;
        let word = self.image.word_size();
        Ok((raw + word - 1) & !(word - 1))
    }
}

impl PartialEq for SymbolRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.image, other.image) && self.addr == other.addr
    }
}

impl fmt::Debug for SymbolRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SymbolRef({})", self.addr)
    }
}
