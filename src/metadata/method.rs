// Thu Apr 16 2026 - Alex

use crate::error::{ModelError, Result};
use crate::image::RuntimeImage;
use crate::klass::AccessFlags;
use crate::memory::Address;
use crate::metadata::{ConstMethodRef, MethodDataRef, SymbolRef};
use std::fmt;

const TY: &str = "Method";

/// The mutable half of a method: dispatch index, entry points, links to
/// profiling and compiled code. The immutable, shareable half lives in the
/// ConstMethod record. Entry-point fields change as the method moves
/// between interpreter and compiled code; snapshots only.
#[derive(Clone, Copy)]
pub struct MethodRef<'img> {
    image: &'img RuntimeImage,
    addr: Address,
}

impl<'img> MethodRef<'img> {
    pub(crate) fn new(image: &'img RuntimeImage, addr: Address) -> Self {
        Self { image, addr }
    }

    pub fn address(&self) -> Address {
        self.addr
    }

    /// Every method has its immutable half; a null link is a corrupt
    /// record, not an absent one.
    pub fn const_method(&self) -> Result<ConstMethodRef<'img>> {
        let ptr = self.image.read_ptr_field(TY, "_constMethod", self.addr)?;
        if ptr.is_null() {
            return Err(ModelError::NullPointer("ConstMethod"));
        }
        self.image.const_method_at(ptr)
    }

    pub fn method_data(&self) -> Result<Option<MethodDataRef<'img>>> {
        let ptr = self.image.read_ptr_field(TY, "_method_data", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image.method_data_at(ptr)?))
    }

    pub fn method_counters(&self) -> Result<Address> {
        self.image.read_ptr_field(TY, "_method_counters", self.addr)
    }

    pub fn adapter(&self) -> Result<Address> {
        self.image.read_ptr_field(TY, "_adapter", self.addr)
    }

    pub fn access_flags(&self) -> Result<AccessFlags> {
        Ok(AccessFlags::from_jint(self.image.read_i32_field(TY, "_access_flags", self.addr)?))
    }

    pub fn vtable_index(&self) -> Result<i32> {
        self.image.read_i32_field(TY, "_vtable_index", self.addr)
    }

    pub fn intrinsic_id(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_intrinsic_id", self.addr)
    }

    pub fn flags(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_flags", self.addr)
    }

    pub fn i2i_entry(&self) -> Result<Address> {
        self.image.read_ptr_field(TY, "_i2i_entry", self.addr)
    }

    pub fn from_compiled_entry(&self) -> Result<Address> {
        self.image.read_ptr_field(TY, "_from_compiled_entry", self.addr)
    }

    /// Installed compiled code, null while interpreted only.
    pub fn code(&self) -> Result<Address> {
        self.image.read_ptr_field(TY, "_code", self.addr)
    }

    pub fn from_interpreted_entry(&self) -> Result<Address> {
        self.image.read_ptr_field(TY, "_from_interpreted_entry", self.addr)
    }

    pub fn is_native(&self) -> Result<bool> {
        Ok(self.access_flags()?.is_native())
    }

    pub fn is_static(&self) -> Result<bool> {
        Ok(self.access_flags()?.is_static())
    }

    /// Method name, resolved through the owning constant pool.
    pub fn name(&self) -> Result<SymbolRef<'img>> {
        let const_method = self.const_method()?;
        let pool = const_method.constants()?;
        pool.symbol_at(const_method.name_index()? as usize)
    }

    /// Method signature, resolved the same way.
    pub fn signature(&self) -> Result<SymbolRef<'img>> {
        let const_method = self.const_method()?;
        let pool = const_method.constants()?;
        pool.symbol_at(const_method.signature_index()? as usize)
    }
}

impl fmt::Debug for MethodRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodRef({})", self.addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ImageBuilder;

    #[test]
    fn test_basic_fields() {
        let mut b = ImageBuilder::new();
        let m = b.alloc_meta("Method");
        b.set_i32_field("Method", "_access_flags", m, 0x0109);
        b.set_i32_field("Method", "_vtable_index", m, -2);
        b.set_u16_field("Method", "_intrinsic_id", m, 44);
        b.set_ptr_field("Method", "_code", m, 0);
        let image = b.build();

        let method = image.method_at(m).unwrap();
        assert!(method.is_native().unwrap());
        assert!(method.is_static().unwrap());
        assert_eq!(method.vtable_index().unwrap(), -2);
        assert_eq!(method.intrinsic_id().unwrap(), 44);
        assert!(method.code().unwrap().is_null());
    }

    #[test]
    fn test_null_const_method_is_corrupt() {
        let mut b = ImageBuilder::new();
        let m = b.alloc_meta("Method");
        let image = b.build();

        let method = image.method_at(m).unwrap();
        assert!(matches!(
            method.const_method(),
            Err(ModelError::NullPointer("ConstMethod"))
        ));
    }

    #[test]
    fn test_name_through_constant_pool() {
        let mut b = ImageBuilder::new();
        let m = b.alloc_meta("Method");
        let cm = b.alloc_meta("ConstMethod");
        let pool = b.alloc_constant_pool(8);
        let name = b.alloc_symbol(b"compute");
        let sig = b.alloc_symbol(b"()I");

        b.set_ptr_field("Method", "_constMethod", m, cm.as_u64());
        b.set_ptr_field("ConstMethod", "_constants", cm, pool.as_u64());
        b.set_u16_field("ConstMethod", "_name_index", cm, 3);
        b.set_u16_field("ConstMethod", "_signature_index", cm, 4);
        b.set_pool_slot(pool, 3, name.as_u64());
        b.set_pool_slot(pool, 4, sig.as_u64());
        let image = b.build();

        let method = image.method_at(m).unwrap();
        assert_eq!(method.name().unwrap().as_string().unwrap(), "compute");
        assert_eq!(method.signature().unwrap().as_string().unwrap(), "()I");
    }
}
