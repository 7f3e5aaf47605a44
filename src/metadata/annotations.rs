// Thu Apr 16 2026 - Alex

use crate::error::Result;
use crate::image::RuntimeImage;
use crate::memory::Address;
use crate::metadata::MetaArray;
use std::fmt;

const TY: &str = "Annotations";

/// Raw annotation blobs for a class and its fields. Each blob is an
/// undecoded byte array in class-file encoding; per-field collections are
/// arrays of pointers to such blobs.
#[derive(Clone, Copy)]
pub struct AnnotationsRef<'img> {
    image: &'img RuntimeImage,
    addr: Address,
}

impl<'img> AnnotationsRef<'img> {
    pub(crate) fn new(image: &'img RuntimeImage, addr: Address) -> Self {
        Self { image, addr }
    }

    pub fn address(&self) -> Address {
        self.addr
    }

    fn blob(&self, field: &str) -> Result<Option<MetaArray<'img, u8>>> {
        let ptr = self.image.read_ptr_field(TY, field, self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(MetaArray::new(self.image, ptr)))
    }

    fn blob_table(&self, field: &str) -> Result<Option<MetaArray<'img, Address>>> {
        let ptr = self.image.read_ptr_field(TY, field, self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(MetaArray::new(self.image, ptr)))
    }

    pub fn class_annotations(&self) -> Result<Option<MetaArray<'img, u8>>> {
        self.blob("_class_annotations")
    }

    pub fn fields_annotations(&self) -> Result<Option<MetaArray<'img, Address>>> {
        self.blob_table("_fields_annotations")
    }

    pub fn class_type_annotations(&self) -> Result<Option<MetaArray<'img, u8>>> {
        self.blob("_class_type_annotations")
    }

    pub fn fields_type_annotations(&self) -> Result<Option<MetaArray<'img, Address>>> {
        self.blob_table("_fields_type_annotations")
    }
}

impl fmt::Debug for AnnotationsRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnnotationsRef({})", self.addr)
    }
}
