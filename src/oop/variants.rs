// Fri Apr 17 2026 - Alex

use crate::error::{ModelError, Result};
use crate::jtypes::NarrowOop;
use crate::memory::Address;
use crate::oop::OopRef;
use std::fmt;
use std::ops::Deref;

/// A plain instance. Adds nothing to the header; instance state lives at
/// class-computed offsets.
#[derive(Clone, Copy)]
pub struct InstanceOopRef<'img> {
    oop: OopRef<'img>,
}

impl<'img> InstanceOopRef<'img> {
    pub(crate) fn from_oop(oop: OopRef<'img>) -> Self {
        Self { oop }
    }

    pub fn oop(&self) -> &OopRef<'img> {
        &self.oop
    }

    /// Instance size from the class's sizing word, when computed.
    pub fn size_bytes(&self) -> Result<Option<u64>> {
        Ok(self.klass()?.layout_helper()?.instance_size_bytes())
    }
}

impl<'img> Deref for InstanceOopRef<'img> {
    type Target = OopRef<'img>;

    fn deref(&self) -> &Self::Target {
        &self.oop
    }
}

impl fmt::Debug for InstanceOopRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstanceOopRef({})", self.address())
    }
}

/// Shared shape of both array kinds: the length word directly after the
/// header, elements at the class-computed base.
#[derive(Clone, Copy)]
pub struct ArrayOopRef<'img> {
    oop: OopRef<'img>,
}

impl<'img> ArrayOopRef<'img> {
    pub(crate) fn from_oop(oop: OopRef<'img>) -> Self {
        Self { oop }
    }

    pub fn oop(&self) -> &OopRef<'img> {
        &self.oop
    }

    pub fn length(&self) -> Result<usize> {
        let addr = self.address() + self.header_bytes()?;
        let raw = self.image().reader().read_i32(addr)?;
        if raw < 0 {
            return Err(ModelError::NegativeLength(raw));
        }
        Ok(raw as usize)
    }

    /// Byte offset of element zero, from the class's sizing word.
    pub fn element_base_bytes(&self) -> Result<u64> {
        self.klass()?
            .layout_helper()?
            .array_header_bytes()
            .ok_or(ModelError::KindMismatch {
                expected: "array layout helper",
                found: "instance sizing word".into(),
            })
    }

    pub fn element_size_bytes(&self) -> Result<u64> {
        self.klass()?
            .layout_helper()?
            .element_size_bytes()
            .ok_or(ModelError::KindMismatch {
                expected: "array layout helper",
                found: "instance sizing word".into(),
            })
    }

    /// Address of one element, rejected before the read when out of
    /// bounds.
    pub fn element_addr(&self, index: usize) -> Result<Address> {
        let length = self.length()?;
        if index >= length {
            return Err(ModelError::BoundsViolation { index, length });
        }
        let base = self.element_base_bytes()?;
        let size = self.element_size_bytes()?;
        Ok(self.address() + base + index as u64 * size)
    }
}

impl<'img> Deref for ArrayOopRef<'img> {
    type Target = OopRef<'img>;

    fn deref(&self) -> &Self::Target {
        &self.oop
    }
}

impl fmt::Debug for ArrayOopRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArrayOopRef({})", self.address())
    }
}

/// An array of object references, stored narrow or full per the image
/// configuration.
#[derive(Clone, Copy)]
pub struct ObjArrayOopRef<'img> {
    array: ArrayOopRef<'img>,
}

impl<'img> ObjArrayOopRef<'img> {
    pub(crate) fn from_oop(oop: OopRef<'img>) -> Self {
        Self { array: ArrayOopRef::from_oop(oop) }
    }

    /// Element `index` as an object address; null elements come back as
    /// None.
    pub fn obj_at(&self, index: usize) -> Result<Option<OopRef<'img>>> {
        let addr = self.element_addr(index)?;
        let target = if self.image().config().compressed_oops.is_some() {
            let narrow = NarrowOop::from_raw(self.image().reader().read_u32(addr)?);
            self.image().resolve_narrow_oop(narrow)?
        } else {
            self.image().read_ptr_at(addr)?
        };
        if target.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image().oop_at(target)?))
    }
}

impl<'img> Deref for ObjArrayOopRef<'img> {
    type Target = ArrayOopRef<'img>;

    fn deref(&self) -> &Self::Target {
        &self.array
    }
}

impl fmt::Debug for ObjArrayOopRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjArrayOopRef({})", self.address())
    }
}

/// An array of primitive values.
#[derive(Clone, Copy)]
pub struct TypeArrayOopRef<'img> {
    array: ArrayOopRef<'img>,
}

impl<'img> TypeArrayOopRef<'img> {
    pub(crate) fn from_oop(oop: OopRef<'img>) -> Self {
        Self { array: ArrayOopRef::from_oop(oop) }
    }
}

impl<'img> Deref for TypeArrayOopRef<'img> {
    type Target = ArrayOopRef<'img>;

    fn deref(&self) -> &Self::Target {
        &self.array
    }
}

impl fmt::Debug for TypeArrayOopRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeArrayOopRef({})", self.address())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jtypes::BasicType;
    use crate::klass::KlassKind;
    use crate::oop::LayoutHelper;
    use crate::testutil::ImageBuilder;

    fn int_array_fixture(values: &[i32]) -> (ImageBuilder, Address) {
        let mut b = ImageBuilder::new();
        let k = b.alloc_meta("TypeArrayKlass");
        b.set_u32_field("Klass", "_kind", k, KlassKind::TypeArray as u32);
        let lh = LayoutHelper::pack_type_array(24, BasicType::Int, 2);
        b.set_i32_field("Klass", "_layout_helper", k, lh.raw());

        let obj = b.alloc_heap(24 + 4 * values.len() as u64);
        b.set_ptr_field("oopDesc", "_metadata", obj, k.as_u64());
        b.poke_i32(obj.as_u64() + 16, values.len() as i32);
        for (i, v) in values.iter().enumerate() {
            b.poke_i32(obj.as_u64() + 24 + 4 * i as u64, *v);
        }
        (b, obj)
    }

    #[test]
    fn test_type_array_elements() {
        let (b, obj) = int_array_fixture(&[5, 6, 7]);
        let image = b.build();

        let arr = image.oop_at(obj).unwrap().as_type_array().unwrap();
        assert_eq!(arr.length().unwrap(), 3);
        assert_eq!(arr.element_size_bytes().unwrap(), 4);
        let e1 = arr.element_addr(1).unwrap();
        assert_eq!(image.reader().read_i32(e1).unwrap(), 6);
        assert!(matches!(
            arr.element_addr(3),
            Err(ModelError::BoundsViolation { index: 3, length: 3 })
        ));
    }

    #[test]
    fn test_zero_length_array() {
        let (b, obj) = int_array_fixture(&[]);
        let image = b.build();

        let arr = image.oop_at(obj).unwrap().as_type_array().unwrap();
        assert_eq!(arr.length().unwrap(), 0);
        assert!(arr.element_addr(0).is_err());
    }

    #[test]
    fn test_obj_array_elements() {
        let mut b = ImageBuilder::new();
        let ik = b.alloc_meta("InstanceKlass");
        b.set_u32_field("Klass", "_kind", ik, KlassKind::Instance as u32);
        let oak = b.alloc_meta("ObjArrayKlass");
        b.set_u32_field("Klass", "_kind", oak, KlassKind::ObjArray as u32);
        let lh = LayoutHelper::pack_obj_array(24, 3);
        b.set_i32_field("Klass", "_layout_helper", oak, lh.raw());

        let element = b.alloc_heap(16);
        b.set_ptr_field("oopDesc", "_metadata", element, ik.as_u64());

        let obj = b.alloc_heap(24 + 16);
        b.set_ptr_field("oopDesc", "_metadata", obj, oak.as_u64());
        b.poke_i32(obj.as_u64() + 16, 2);
        b.poke_ptr(obj.as_u64() + 24, element.as_u64());
        let image = b.build();

        let arr = image.oop_at(obj).unwrap().as_obj_array().unwrap();
        assert_eq!(arr.length().unwrap(), 2);
        let first = arr.obj_at(0).unwrap().unwrap();
        assert_eq!(first.address(), element);
        assert!(arr.obj_at(1).unwrap().is_none());
        assert!(arr.obj_at(2).is_err());
    }

    #[test]
    fn test_instance_size() {
        let mut b = ImageBuilder::new();
        let k = b.alloc_meta("InstanceKlass");
        b.set_u32_field("Klass", "_kind", k, KlassKind::Instance as u32);
        b.set_i32_field("Klass", "_layout_helper", k, LayoutHelper::pack_instance(32, false).raw());
        let obj = b.alloc_heap(32);
        b.set_ptr_field("oopDesc", "_metadata", obj, k.as_u64());
        let image = b.build();

        let instance = image.oop_at(obj).unwrap().as_instance().unwrap();
        assert_eq!(instance.size_bytes().unwrap(), Some(32));
    }
}
