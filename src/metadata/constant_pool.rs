// Thu Apr 16 2026 - Alex

use crate::error::{ModelError, Result};
use crate::image::RuntimeImage;
use crate::klass::InstanceKlassRef;
use crate::memory::Address;
use crate::metadata::{ConstantPoolCacheRef, MetaArray, SymbolRef};
use std::fmt;

const TY: &str = "ConstantPool";

/// The per-class constant pool. The fixed header modeled here is followed
/// inline by `_length` word-sized slots; resolved symbolic entries hold a
/// Symbol* directly in their slot.
#[derive(Clone, Copy)]
pub struct ConstantPoolRef<'img> {
    image: &'img RuntimeImage,
    addr: Address,
}

impl<'img> ConstantPoolRef<'img> {
    pub(crate) fn new(image: &'img RuntimeImage, addr: Address) -> Self {
        Self { image, addr }
    }

    pub fn address(&self) -> Address {
        self.addr
    }

    /// Tag byte per pool slot.
    pub fn tags(&self) -> Result<Option<MetaArray<'img, u8>>> {
        let ptr = self.image.read_ptr_field(TY, "_tags", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(MetaArray::new(self.image, ptr)))
    }

    pub fn cache(&self) -> Result<Option<ConstantPoolCacheRef<'img>>> {
        let ptr = self.image.read_ptr_field(TY, "_cache", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image.constant_pool_cache_at(ptr)?))
    }

    pub fn pool_holder(&self) -> Result<Option<InstanceKlassRef<'img>>> {
        let ptr = self.image.read_ptr_field(TY, "_pool_holder", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        self.image.klass_at(ptr)?.as_instance_klass().map(Some)
    }

    pub fn operands(&self) -> Result<Option<MetaArray<'img, u16>>> {
        let ptr = self.image.read_ptr_field(TY, "_operands", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(MetaArray::new(self.image, ptr)))
    }

    pub fn resolved_klasses(&self) -> Result<Option<MetaArray<'img, Address>>> {
        let ptr = self.image.read_ptr_field(TY, "_resolved_klasses", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(MetaArray::new(self.image, ptr)))
    }

    pub fn major_version(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_major_version", self.addr)
    }

    pub fn minor_version(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_minor_version", self.addr)
    }

    pub fn generic_signature_index(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_generic_signature_idx", self.addr)
    }

    pub fn source_file_name_index(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_source_file_name_idx", self.addr)
    }

    pub fn flags(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_flags", self.addr)
    }

    pub fn length(&self) -> Result<i32> {
        self.image.read_i32_field(TY, "_length", self.addr)
    }

    /// The saved union: resolved-reference length or version, depending on
    /// the record's phase.
    pub fn saved(&self) -> Result<i32> {
        self.image.read_i32_field(TY, "_saved", self.addr)
    }

    /// Raw word in pool slot `index`. Slot 0 is unused in the class file
    /// format but still present.
    pub fn entry_at(&self, index: usize) -> Result<u64> {
        let slot = self.slot_addr(index)?;
        match self.image.pointer_width() {
            crate::jtypes::PointerWidth::P32 => Ok(self.image.reader().read_u32(slot)? as u64),
            crate::jtypes::PointerWidth::P64 => Ok(self.image.reader().read_u64(slot)?),
        }
    }

    /// A symbolic slot's Symbol*, for name/signature/UTF-8 entries.
    pub fn symbol_at(&self, index: usize) -> Result<SymbolRef<'img>> {
        let slot = self.slot_addr(index)?;
        let ptr = self.image.read_ptr_at(slot)?;
        if ptr.is_null() {
            return Err(ModelError::NullPointer("Symbol"));
        }
        self.image.symbol_at(ptr)
    }

    pub fn source_file_name(&self) -> Result<Option<SymbolRef<'img>>> {
        let index = self.source_file_name_index()?;
        if index == 0 {
            return Ok(None);
        }
        self.symbol_at(index as usize).map(Some)
    }

    pub fn generic_signature(&self) -> Result<Option<SymbolRef<'img>>> {
        let index = self.generic_signature_index()?;
        if index == 0 {
            return Ok(None);
        }
        self.symbol_at(index as usize).map(Some)
    }

    fn slot_addr(&self, index: usize) -> Result<Address> {
        let length = self.length()?;
        if length < 0 {
            return Err(ModelError::NegativeLength(length));
        }
        if index >= length as usize {
            return Err(ModelError::BoundsViolation { index, length: length as usize });
        }
        let header = self.image.profile().size_of(TY)?;
        Ok(self.addr + header + index as u64 * self.image.word_size())
    }

    /// Header plus inline slots.
    pub fn byte_size(&self) -> Result<u64> {
        let length = self.length()?;
        if length < 0 {
            return Err(ModelError::NegativeLength(length));
        }
        let header = self.image.profile().size_of(TY)?;
        Ok(header + length as u64 * self.image.word_size())
    }
}

impl fmt::Debug for ConstantPoolRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConstantPoolRef({})", self.addr)
    }
}
