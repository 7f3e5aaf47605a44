// Thu Apr 16 2026 - Alex

use crate::error::Result;
use crate::image::RuntimeImage;
use crate::memory::Address;
use crate::metadata::MethodRef;
use std::fmt;

const TY: &str = "MethodData";

/// Profiling record for one method. The mirrored header stops at the hint
/// index; the profile data area and the extra-data mutex that follow it in
/// the target are not modeled.
#[derive(Clone, Copy)]
pub struct MethodDataRef<'img> {
    image: &'img RuntimeImage,
    addr: Address,
}

impl<'img> MethodDataRef<'img> {
    pub(crate) fn new(image: &'img RuntimeImage, addr: Address) -> Self {
        Self { image, addr }
    }

    pub fn address(&self) -> Address {
        self.addr
    }

    pub fn method(&self) -> Result<Option<MethodRef<'img>>> {
        let ptr = self.image.read_ptr_field(TY, "_method", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image.method_at(ptr)?))
    }

    /// Record size in bytes, data area included.
    pub fn size(&self) -> Result<i32> {
        self.image.read_i32_field(TY, "_size", self.addr)
    }

    pub fn hint_di(&self) -> Result<i32> {
        self.image.read_i32_field(TY, "_hint_di", self.addr)
    }
}

impl fmt::Debug for MethodDataRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MethodDataRef({})", self.addr)
    }
}
