// Thu Apr 16 2026 - Alex

use crate::error::{ModelError, Result};
use crate::image::RuntimeImage;
use crate::jtypes::PointerWidth;
use crate::memory::Address;
use std::fmt;
use std::marker::PhantomData;

/// Element kinds a metaspace array can hold: the fixed-width scalars the
/// runtime stores in them, plus pointer slots for the Klass*/Method*-style
/// arrays.
pub trait MetaElement: Sized {
    fn element_size(width: PointerWidth) -> u64;

    fn element_alignment(width: PointerWidth) -> u64 {
        Self::element_size(width)
    }

    fn read_element(image: &RuntimeImage, addr: Address) -> Result<Self>;
}

impl MetaElement for u8 {
    fn element_size(_width: PointerWidth) -> u64 {
        1
    }

    fn read_element(image: &RuntimeImage, addr: Address) -> Result<Self> {
        Ok(image.reader().read_u8(addr)?)
    }
}

impl MetaElement for u16 {
    fn element_size(_width: PointerWidth) -> u64 {
        2
    }

    fn read_element(image: &RuntimeImage, addr: Address) -> Result<Self> {
        Ok(image.reader().read_u16(addr)?)
    }
}

impl MetaElement for u32 {
    fn element_size(_width: PointerWidth) -> u64 {
        4
    }

    fn read_element(image: &RuntimeImage, addr: Address) -> Result<Self> {
        Ok(image.reader().read_u32(addr)?)
    }
}

impl MetaElement for u64 {
    fn element_size(_width: PointerWidth) -> u64 {
        8
    }

    fn read_element(image: &RuntimeImage, addr: Address) -> Result<Self> {
        Ok(image.reader().read_u64(addr)?)
    }
}

impl MetaElement for i32 {
    fn element_size(_width: PointerWidth) -> u64 {
        4
    }

    fn read_element(image: &RuntimeImage, addr: Address) -> Result<Self> {
        Ok(image.reader().read_i32(addr)?)
    }
}

impl MetaElement for Address {
    fn element_size(width: PointerWidth) -> u64 {
        width.bytes()
    }

    fn read_element(image: &RuntimeImage, addr: Address) -> Result<Self> {
        image.read_ptr_at(addr)
    }
}

/// View of the runtime's length-prefixed inline array: a 4-byte length
/// followed by exactly `length` contiguous elements at the element's
/// natural alignment. Fixed size at allocation; there is no growth and no
/// mutation here, only bounds-checked reads.
pub struct MetaArray<'img, T: MetaElement> {
    image: &'img RuntimeImage,
    addr: Address,
    _marker: PhantomData<T>,
}

impl<'img, T: MetaElement> MetaArray<'img, T> {
    pub(crate) fn new(image: &'img RuntimeImage, addr: Address) -> Self {
        Self { image, addr, _marker: PhantomData }
    }

    pub fn address(&self) -> Address {
        self.addr
    }

    pub fn len(&self) -> Result<usize> {
        let raw = self.image.reader().read_i32(self.addr)?;
        if raw < 0 {
            return Err(ModelError::NegativeLength(raw));
        }
        Ok(raw as usize)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn data_offset(&self) -> u64 {
        let align = T::element_alignment(self.image.pointer_width());
        (4 + align - 1) & !(align - 1)
    }

    /// Address of one element, rejected before the read when the index is
    /// outside [0, length).
    pub fn element_addr(&self, index: usize) -> Result<Address> {
        let length = self.len()?;
        if index >= length {
            return Err(ModelError::BoundsViolation { index, length });
        }
        let size = T::element_size(self.image.pointer_width());
        Ok(self.addr + self.data_offset() + index as u64 * size)
    }

    pub fn get(&self, index: usize) -> Result<T> {
        let addr = self.element_addr(index)?;
        T::read_element(self.image, addr)
    }

    pub fn iter(&self) -> Result<impl Iterator<Item = Result<T>> + '_> {
        let length = self.len()?;
        Ok((0..length).map(move |i| self.get(i)))
    }

    pub fn to_vec(&self) -> Result<Vec<T>> {
        self.iter()?.collect()
    }

    /// Total footprint of the record, length word and padding included.
    pub fn byte_size(&self) -> Result<u64> {
        let size = T::element_size(self.image.pointer_width());
        Ok(self.data_offset() + self.len()? as u64 * size)
    }
}

impl<T: MetaElement> fmt::Debug for MetaArray<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MetaArray({})", self.addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ImageBuilder;

    #[test]
    fn test_u2_array_reads() {
        let mut b = ImageBuilder::new();
        let arr = b.alloc_u2_array(&[10, 20, 30]);
        let image = b.build();

        let array: MetaArray<'_, u16> = MetaArray::new(&image, arr);
        assert_eq!(array.len().unwrap(), 3);
        assert_eq!(array.get(0).unwrap(), 10);
        assert_eq!(array.get(1).unwrap(), 20);
        assert_eq!(array.get(2).unwrap(), 30);
        assert!(matches!(
            array.get(3),
            Err(ModelError::BoundsViolation { index: 3, length: 3 })
        ));
        assert_eq!(array.to_vec().unwrap(), vec![10, 20, 30]);
    }

    #[test]
    fn test_empty_array_has_no_valid_index() {
        let mut b = ImageBuilder::new();
        let arr = b.alloc_u2_array(&[]);
        let image = b.build();

        let array: MetaArray<'_, u16> = MetaArray::new(&image, arr);
        assert_eq!(array.len().unwrap(), 0);
        assert!(array.is_empty().unwrap());
        assert!(matches!(
            array.get(0),
            Err(ModelError::BoundsViolation { index: 0, length: 0 })
        ));
    }

    #[test]
    fn test_single_element_boundary() {
        let mut b = ImageBuilder::new();
        let arr = b.alloc_u2_array(&[42]);
        let image = b.build();

        let array: MetaArray<'_, u16> = MetaArray::new(&image, arr);
        assert_eq!(array.get(0).unwrap(), 42);
        assert!(array.get(1).is_err());
    }

    #[test]
    fn test_u2_elements_start_after_length_word() {
        let mut b = ImageBuilder::new();
        let arr = b.alloc_u2_array(&[7]);
        let image = b.build();

        let array: MetaArray<'_, u16> = MetaArray::new(&image, arr);
        // 2-byte elements need no padding past the 4-byte length.
        assert_eq!(array.element_addr(0).unwrap(), arr + 4);
        assert_eq!(array.byte_size().unwrap(), 6);
    }

    #[test]
    fn test_pointer_elements_align_to_word() {
        let mut b = ImageBuilder::new();
        let arr = b.alloc_raw(24, 8);
        b.poke_i32(arr.as_u64(), 2);
        b.poke_ptr(arr.as_u64() + 8, 0xdead_0000);
        b.poke_ptr(arr.as_u64() + 16, 0xbeef_0000);
        let image = b.build();

        let array: MetaArray<'_, Address> = MetaArray::new(&image, arr);
        assert_eq!(array.element_addr(0).unwrap(), arr + 8);
        assert_eq!(array.get(1).unwrap(), Address::new(0xbeef_0000));
        assert_eq!(array.byte_size().unwrap(), 24);
    }

    #[test]
    fn test_negative_length_is_corrupt() {
        let mut b = ImageBuilder::new();
        let arr = b.alloc_raw(8, 8);
        b.poke_i32(arr.as_u64(), -1);
        let image = b.build();

        let array: MetaArray<'_, u16> = MetaArray::new(&image, arr);
        assert!(matches!(array.len(), Err(ModelError::NegativeLength(-1))));
    }
}
