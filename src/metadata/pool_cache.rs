// Thu Apr 16 2026 - Alex

use crate::error::Result;
use crate::image::RuntimeImage;
use crate::jtypes::OopHandle;
use crate::memory::Address;
use crate::metadata::{ConstantPoolRef, MetaArray};
use std::fmt;

const TY: &str = "ConstantPoolCache";

/// Runtime-resolution cache attached to a constant pool after rewriting.
#[derive(Clone, Copy)]
pub struct ConstantPoolCacheRef<'img> {
    image: &'img RuntimeImage,
    addr: Address,
}

impl<'img> ConstantPoolCacheRef<'img> {
    pub(crate) fn new(image: &'img RuntimeImage, addr: Address) -> Self {
        Self { image, addr }
    }

    pub fn address(&self) -> Address {
        self.addr
    }

    pub fn length(&self) -> Result<i32> {
        self.image.read_i32_field(TY, "_length", self.addr)
    }

    pub fn constant_pool(&self) -> Result<Option<ConstantPoolRef<'img>>> {
        let ptr = self.image.read_ptr_field(TY, "_constant_pool", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image.constant_pool_at(ptr)?))
    }

    /// Handle to the resolved-references array on the heap.
    pub fn resolved_references(&self) -> Result<OopHandle> {
        let location = self.image.read_ptr_field(TY, "_resolved_references", self.addr)?;
        Ok(OopHandle::new(location))
    }

    pub fn reference_map(&self) -> Result<Option<MetaArray<'img, u16>>> {
        let ptr = self.image.read_ptr_field(TY, "_reference_map", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(MetaArray::new(self.image, ptr)))
    }

    /// Archive index for the resolved-references array; a version
    /// placeholder that may be disabled in the target build.
    pub fn archived_references_index(&self) -> Result<i32> {
        self.image.read_i32_field(TY, "_archived_references_idx", self.addr)
    }
}

impl fmt::Debug for ConstantPoolCacheRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConstantPoolCacheRef({})", self.addr)
    }
}
