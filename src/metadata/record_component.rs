// Thu Apr 16 2026 - Alex

use crate::error::Result;
use crate::image::RuntimeImage;
use crate::memory::Address;
use crate::metadata::MetaArray;
use std::fmt;

const TY: &str = "RecordComponent";

/// One component of a record class: constant-pool indices for its name and
/// descriptor plus its annotation blobs.
#[derive(Clone, Copy)]
pub struct RecordComponentRef<'img> {
    image: &'img RuntimeImage,
    addr: Address,
}

impl<'img> RecordComponentRef<'img> {
    pub(crate) fn new(image: &'img RuntimeImage, addr: Address) -> Self {
        Self { image, addr }
    }

    pub fn address(&self) -> Address {
        self.addr
    }

    pub fn annotations(&self) -> Result<Option<MetaArray<'img, u8>>> {
        let ptr = self.image.read_ptr_field(TY, "_annotations", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(MetaArray::new(self.image, ptr)))
    }

    pub fn type_annotations(&self) -> Result<Option<MetaArray<'img, u8>>> {
        let ptr = self.image.read_ptr_field(TY, "_type_annotations", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(MetaArray::new(self.image, ptr)))
    }

    pub fn name_index(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_name_index", self.addr)
    }

    pub fn descriptor_index(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_descriptor_index", self.addr)
    }

    pub fn attributes_count(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_attributes_count", self.addr)
    }
}

impl fmt::Debug for RecordComponentRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordComponentRef({})", self.addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ImageBuilder;

    #[test]
    fn test_indices() {
        let mut b = ImageBuilder::new();
        let rc = b.alloc_meta("RecordComponent");
        b.set_u16_field("RecordComponent", "_name_index", rc, 11);
        b.set_u16_field("RecordComponent", "_descriptor_index", rc, 12);
        b.set_u16_field("RecordComponent", "_attributes_count", rc, 1);
        let image = b.build();

        let rc = image.record_component_at(rc).unwrap();
        assert_eq!(rc.name_index().unwrap(), 11);
        assert_eq!(rc.descriptor_index().unwrap(), 12);
        assert_eq!(rc.attributes_count().unwrap(), 1);
        assert!(rc.annotations().unwrap().is_none());
    }
}
