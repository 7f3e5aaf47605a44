// Thu Apr 16 2026 - Alex

use crate::error::{ModelError, Result};
use crate::image::RuntimeImage;
use crate::memory::Address;
use crate::metadata::{ConstantPoolRef, MetaArray};
use std::fmt;

const TY: &str = "ConstMethod";

/// Whether a method is a declared one or a compiler-generated overpass
/// bridging default-method dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodVariant {
    Normal,
    Overpass,
}

/// The immutable, shareable half of a method: sizing, indices into the
/// constant pool, stack/local dimensions. Bytecode follows the record
/// inline in the target; this mirror models the fixed header only.
#[derive(Clone, Copy)]
pub struct ConstMethodRef<'img> {
    image: &'img RuntimeImage,
    addr: Address,
}

impl<'img> ConstMethodRef<'img> {
    pub(crate) fn new(image: &'img RuntimeImage, addr: Address) -> Self {
        Self { image, addr }
    }

    pub fn address(&self) -> Address {
        self.addr
    }

    pub fn fingerprint(&self) -> Result<u64> {
        self.image.read_u64_field(TY, "_fingerprint", self.addr)
    }

    /// Back-link to the owning constant pool; null only in a corrupt
    /// capture.
    pub fn constants(&self) -> Result<ConstantPoolRef<'img>> {
        let ptr = self.image.read_ptr_field(TY, "_constants", self.addr)?;
        if ptr.is_null() {
            return Err(ModelError::NullPointer("ConstantPool"));
        }
        self.image.constant_pool_at(ptr)
    }

    pub fn stackmap_data(&self) -> Result<Option<MetaArray<'img, u8>>> {
        let ptr = self.image.read_ptr_field(TY, "_stackmap_data", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(MetaArray::new(self.image, ptr)))
    }

    /// Record size in words, bytecode included.
    pub fn const_method_size(&self) -> Result<i32> {
        self.image.read_i32_field(TY, "_constMethod_size", self.addr)
    }

    pub fn flags(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_flags", self.addr)
    }

    /// The overpass bit of the flags word.
    pub fn variant(&self) -> Result<MethodVariant> {
        Ok(if self.flags()? & 0x1 != 0 {
            MethodVariant::Overpass
        } else {
            MethodVariant::Normal
        })
    }

    pub fn result_size(&self) -> Result<u8> {
        self.image.read_u8_field(TY, "_result_size", self.addr)
    }

    pub fn code_size(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_code_size", self.addr)
    }

    pub fn name_index(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_name_index", self.addr)
    }

    pub fn signature_index(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_signature_index", self.addr)
    }

    pub fn method_idnum(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_method_idnum", self.addr)
    }

    pub fn max_stack(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_max_stack", self.addr)
    }

    pub fn max_locals(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_max_locals", self.addr)
    }

    pub fn size_of_parameters(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_size_of_parameters", self.addr)
    }

    pub fn orig_idnum(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_orig_id_num", self.addr)
    }

    pub fn byte_size(&self) -> Result<u64> {
        Ok(self.const_method_size()? as u64 * self.image.word_size())
    }
}

impl fmt::Debug for ConstMethodRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConstMethodRef({})", self.addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ImageBuilder;

    #[test]
    fn test_fields() {
        let mut b = ImageBuilder::new();
        let cm = b.alloc_meta("ConstMethod");
        b.set_u64_field("ConstMethod", "_fingerprint", cm, 0xfeed_face_cafe_beef);
        b.set_u16_field("ConstMethod", "_code_size", cm, 120);
        b.set_u16_field("ConstMethod", "_max_stack", cm, 4);
        b.set_u16_field("ConstMethod", "_max_locals", cm, 6);
        b.set_i32_field("ConstMethod", "_constMethod_size", cm, 30);
        let image = b.build();

        let cm = image.const_method_at(cm).unwrap();
        assert_eq!(cm.fingerprint().unwrap(), 0xfeed_face_cafe_beef);
        assert_eq!(cm.code_size().unwrap(), 120);
        assert_eq!(cm.max_stack().unwrap(), 4);
        assert_eq!(cm.max_locals().unwrap(), 6);
        assert_eq!(cm.byte_size().unwrap(), 240);
        assert!(cm.stackmap_data().unwrap().is_none());
    }

    #[test]
    fn test_variant_bit() {
        let mut b = ImageBuilder::new();
        let cm = b.alloc_meta("ConstMethod");
        b.set_u16_field("ConstMethod", "_flags", cm, 0x1);
        let image = b.build();
        assert_eq!(image.const_method_at(cm).unwrap().variant().unwrap(), MethodVariant::Overpass);
    }
}
