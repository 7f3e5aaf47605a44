// Wed Apr 15 2026 - Alex

use crate::error::Result;
use crate::jtypes::BasicType;
use crate::klass::KlassRef;
use std::fmt;
use std::ops::Deref;

const TY: &str = "ArrayKlass";

/// Shared descriptor state of both array kinds: dimensionality and the
/// links into the higher/lower-dimension descriptor chain.
#[derive(Clone, Copy)]
pub struct ArrayKlassRef<'img> {
    klass: KlassRef<'img>,
}

impl<'img> ArrayKlassRef<'img> {
    pub(crate) fn from_klass(klass: KlassRef<'img>) -> Self {
        Self { klass }
    }

    pub fn klass(&self) -> &KlassRef<'img> {
        &self.klass
    }

    pub fn dimension(&self) -> Result<i32> {
        self.image().read_i32_field(TY, "_dimension", self.address())
    }

    pub fn higher_dimension(&self) -> Result<Option<KlassRef<'img>>> {
        let ptr = self.image().read_ptr_field(TY, "_higher_dimension", self.address())?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image().klass_at(ptr)?))
    }

    pub fn lower_dimension(&self) -> Result<Option<KlassRef<'img>>> {
        let ptr = self.image().read_ptr_field(TY, "_lower_dimension", self.address())?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image().klass_at(ptr)?))
    }
}

impl<'img> Deref for ArrayKlassRef<'img> {
    type Target = KlassRef<'img>;

    fn deref(&self) -> &Self::Target {
        &self.klass
    }
}

impl fmt::Debug for ArrayKlassRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArrayKlassRef({})", self.address())
    }
}

/// Descriptor of object arrays.
#[derive(Clone, Copy, Debug)]
pub struct ObjArrayKlassRef<'img> {
    array: ArrayKlassRef<'img>,
}

impl<'img> ObjArrayKlassRef<'img> {
    pub(crate) fn from_klass(klass: KlassRef<'img>) -> Self {
        Self { array: ArrayKlassRef::from_klass(klass) }
    }

    pub fn element_class(&self) -> Result<Option<KlassRef<'img>>> {
        let ptr = self.image().read_ptr_field("ObjArrayKlass", "_element_class", self.address())?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image().klass_at(ptr)?))
    }

    /// The non-array class at the bottom of a multi-dimensional chain.
    pub fn bottom_class(&self) -> Result<Option<KlassRef<'img>>> {
        let ptr = self.image().read_ptr_field("ObjArrayKlass", "_bottom_class", self.address())?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image().klass_at(ptr)?))
    }
}

impl<'img> Deref for ObjArrayKlassRef<'img> {
    type Target = ArrayKlassRef<'img>;

    fn deref(&self) -> &Self::Target {
        &self.array
    }
}

/// Descriptor of primitive-value arrays.
#[derive(Clone, Copy, Debug)]
pub struct TypeArrayKlassRef<'img> {
    array: ArrayKlassRef<'img>,
}

impl<'img> TypeArrayKlassRef<'img> {
    pub(crate) fn from_klass(klass: KlassRef<'img>) -> Self {
        Self { array: ArrayKlassRef::from_klass(klass) }
    }

    pub fn max_length(&self) -> Result<i32> {
        self.image().read_i32_field("TypeArrayKlass", "_max_length", self.address())
    }

    /// Element type recovered from the layout-helper word.
    pub fn element_type(&self) -> Result<Option<BasicType>> {
        self.layout_helper()?.element_type()
    }
}

impl<'img> Deref for TypeArrayKlassRef<'img> {
    type Target = ArrayKlassRef<'img>;

    fn deref(&self) -> &Self::Target {
        &self.array
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::klass::KlassKind;
    use crate::oop::LayoutHelper;
    use crate::testutil::ImageBuilder;

    #[test]
    fn test_obj_array_links() {
        let mut b = ImageBuilder::new();
        let element = b.alloc_meta("InstanceKlass");
        let array = b.alloc_meta("ObjArrayKlass");
        b.set_u32_field("Klass", "_kind", element, KlassKind::Instance as u32);
        b.set_u32_field("Klass", "_kind", array, KlassKind::ObjArray as u32);
        b.set_i32_field("ArrayKlass", "_dimension", array, 1);
        b.set_ptr_field("ObjArrayKlass", "_element_class", array, element.as_u64());
        b.set_ptr_field("ObjArrayKlass", "_bottom_class", array, element.as_u64());
        let image = b.build();

        let oak = image.klass_at(array).unwrap().as_obj_array_klass().unwrap();
        assert_eq!(oak.dimension().unwrap(), 1);
        assert_eq!(oak.element_class().unwrap().unwrap().address(), element);
        assert_eq!(oak.bottom_class().unwrap().unwrap().address(), element);
        assert!(oak.higher_dimension().unwrap().is_none());
    }

    #[test]
    fn test_type_array_element_type() {
        let mut b = ImageBuilder::new();
        let array = b.alloc_meta("TypeArrayKlass");
        b.set_u32_field("Klass", "_kind", array, KlassKind::TypeArray as u32);
        b.set_i32_field("ArrayKlass", "_dimension", array, 1);
        b.set_i32_field("TypeArrayKlass", "_max_length", array, i32::MAX - 2);
        let lh = LayoutHelper::pack_type_array(16, BasicType::Int, 2);
        b.set_i32_field("Klass", "_layout_helper", array, lh.raw());
        let image = b.build();

        let tak = image.klass_at(array).unwrap().as_type_array_klass().unwrap();
        assert_eq!(tak.element_type().unwrap(), Some(BasicType::Int));
        assert_eq!(tak.max_length().unwrap(), i32::MAX - 2);
    }
}
