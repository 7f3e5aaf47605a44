// Wed Apr 15 2026 - Alex

use crate::error::{ModelError, Result};
use crate::image::RuntimeImage;
use crate::jtypes::OopHandle;
use crate::klass::array::{ArrayKlassRef, ObjArrayKlassRef, TypeArrayKlassRef};
use crate::klass::instance::{
    InstanceClassLoaderKlassRef, InstanceKlassRef, InstanceMirrorKlassRef, InstanceRefKlassRef,
    InstanceStackChunkKlassRef,
};
use crate::klass::{AccessFlags, KlassKind};
use crate::memory::Address;
use crate::metadata::{MetaArray, SymbolRef};
use crate::oop::LayoutHelper;
use std::fmt;

/// Fixed depth of the direct-superclass cache embedded in every
/// descriptor. Hierarchies deeper than this overflow into the secondary
/// array.
pub const PRIMARY_SUPER_LIMIT: usize = 8;

const TY: &str = "Klass";

/// Borrowed view of a type descriptor in a captured metaspace. Never owns
/// or mutates the record; on a live target the linkage fields (subklass,
/// sibling, cache) are mutated concurrently and read here as racy
/// snapshots.
#[derive(Clone, Copy)]
pub struct KlassRef<'img> {
    image: &'img RuntimeImage,
    addr: Address,
}

impl<'img> KlassRef<'img> {
    pub(crate) fn new(image: &'img RuntimeImage, addr: Address) -> Self {
        Self { image, addr }
    }

    pub fn address(&self) -> Address {
        self.addr
    }

    pub(crate) fn image(&self) -> &'img RuntimeImage {
        self.image
    }

    /// The immutable kind tag. Out-of-range values mean a corrupt or
    /// version-mismatched capture and are never coerced.
    pub fn kind(&self) -> Result<KlassKind> {
        let raw = self.image.read_u32_field(TY, "_kind", self.addr)?;
        KlassKind::try_from(raw)
    }

    pub fn layout_helper(&self) -> Result<LayoutHelper> {
        Ok(LayoutHelper::from_raw(self.image.read_i32_field(TY, "_layout_helper", self.addr)?))
    }

    pub fn modifier_flags(&self) -> Result<i32> {
        self.image.read_i32_field(TY, "_modifier_flags", self.addr)
    }

    pub fn super_check_offset(&self) -> Result<u32> {
        self.image.read_u32_field(TY, "_super_check_offset", self.addr)
    }

    pub fn name(&self) -> Result<Option<SymbolRef<'img>>> {
        let ptr = self.image.read_ptr_field(TY, "_name", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image.symbol_at(ptr)?))
    }

    /// Class name as a string, when the descriptor has one.
    pub fn name_string(&self) -> Result<Option<String>> {
        match self.name()? {
            Some(symbol) => Ok(Some(symbol.as_string()?)),
            None => Ok(None),
        }
    }

    pub fn secondary_super_cache(&self) -> Result<Option<KlassRef<'img>>> {
        let ptr = self.image.read_ptr_field(TY, "_secondary_super_cache", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image.klass_at(ptr)?))
    }

    pub fn secondary_supers(&self) -> Result<Option<MetaArray<'img, Address>>> {
        let ptr = self.image.read_ptr_field(TY, "_secondary_supers", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(MetaArray::new(self.image, ptr)))
    }

    /// Entry of the fixed-depth superclass cache. Depth past the cache is
    /// a caller error, not a silent null.
    pub fn primary_super(&self, depth: usize) -> Result<Option<KlassRef<'img>>> {
        if depth >= PRIMARY_SUPER_LIMIT {
            return Err(ModelError::BoundsViolation { index: depth, length: PRIMARY_SUPER_LIMIT });
        }
        let base = self.image.field_addr(TY, "_primary_supers", self.addr)?;
        let slot = base + depth as u64 * self.image.word_size();
        let ptr = self.image.read_ptr_at(slot)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image.klass_at(ptr)?))
    }

    pub fn java_mirror(&self) -> Result<OopHandle> {
        let location = self.image.read_ptr_field(TY, "_java_mirror", self.addr)?;
        Ok(OopHandle::new(location))
    }

    pub fn super_klass(&self) -> Result<Option<KlassRef<'img>>> {
        let ptr = self.image.read_ptr_field(TY, "super", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image.klass_at(ptr)?))
    }

    pub fn subklass(&self) -> Result<Option<KlassRef<'img>>> {
        let ptr = self.image.read_ptr_field(TY, "_subklass", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image.klass_at(ptr)?))
    }

    pub fn next_sibling(&self) -> Result<Option<KlassRef<'img>>> {
        let ptr = self.image.read_ptr_field(TY, "_next_sibling", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image.klass_at(ptr)?))
    }

    pub fn next_link(&self) -> Result<Option<KlassRef<'img>>> {
        let ptr = self.image.read_ptr_field(TY, "_next_link", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image.klass_at(ptr)?))
    }

    /// Loader-data record, left as a raw pointer; its shape is not part of
    /// this mirror.
    pub fn class_loader_data(&self) -> Result<Address> {
        self.image.read_ptr_field(TY, "_class_loader_data", self.addr)
    }

    pub fn vtable_len(&self) -> Result<i32> {
        self.image.read_i32_field(TY, "_vtable_len", self.addr)
    }

    pub fn access_flags(&self) -> Result<AccessFlags> {
        Ok(AccessFlags::from_jint(self.image.read_i32_field(TY, "_access_flags", self.addr)?))
    }

    pub fn trace_id(&self) -> Result<u64> {
        self.image.read_u64_field(TY, "_trace_id", self.addr)
    }

    pub fn shared_class_path_index(&self) -> Result<i16> {
        self.image.read_i16_field(TY, "_shared_class_path_idx", self.addr)
    }

    pub fn shared_class_flags(&self) -> Result<u16> {
        self.image.read_u16_field(TY, "_shared_class_flags", self.addr)
    }

    pub fn archived_mirror_index(&self) -> Result<i32> {
        self.image.read_i32_field(TY, "_archived_mirror_idx", self.addr)
    }

    pub fn is_interface(&self) -> Result<bool> {
        Ok(self.access_flags()?.is_interface())
    }

    /// Two-tier subtype check, mirroring the descriptor's own scheme: the
    /// ancestor's check offset lands in the fixed primary cache for
    /// shallow hierarchies (one probe), or on the secondary cache slot for
    /// deep/interface ancestors, falling back to a linear scan of the
    /// overflow array. The cache slot is consulted but never written.
    pub fn is_subtype_of(&self, ancestor: &KlassRef<'_>) -> Result<bool> {
        let check_offset = ancestor.super_check_offset()? as u64;
        let cache_offset = self.image.profile().offset_of(TY, "_secondary_super_cache")?;
        if check_offset != cache_offset {
            let probe = self.image.read_ptr_at(self.addr + check_offset)?;
            return Ok(probe == ancestor.addr);
        }
        if self.addr == ancestor.addr {
            return Ok(true);
        }
        let cached = self.image.read_ptr_at(self.addr + cache_offset)?;
        if cached == ancestor.addr {
            return Ok(true);
        }
        let supers = match self.secondary_supers()? {
            Some(supers) => supers,
            None => return Ok(false),
        };
        for entry in supers.iter()? {
            if entry? == ancestor.addr {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn expect_kind(&self, wanted: &'static str, ok: bool) -> Result<()> {
        if ok {
            Ok(())
        } else {
            Err(ModelError::KindMismatch {
                expected: wanted,
                found: self.kind().map(|k| k.to_string()).unwrap_or_else(|_| "corrupt".into()),
            })
        }
    }

    /// Narrow to the instance family. Accepts all four refinements.
    pub fn as_instance_klass(&self) -> Result<InstanceKlassRef<'img>> {
        self.expect_kind("InstanceKlass", self.kind()?.is_instance_family())?;
        Ok(InstanceKlassRef::from_klass(*self))
    }

    pub fn as_instance_mirror_klass(&self) -> Result<InstanceMirrorKlassRef<'img>> {
        self.expect_kind("InstanceMirrorKlass", self.kind()? == KlassKind::InstanceMirror)?;
        Ok(InstanceMirrorKlassRef::from_klass(*self))
    }

    pub fn as_instance_ref_klass(&self) -> Result<InstanceRefKlassRef<'img>> {
        self.expect_kind("InstanceRefKlass", self.kind()? == KlassKind::InstanceRef)?;
        Ok(InstanceRefKlassRef::from_klass(*self))
    }

    pub fn as_instance_class_loader_klass(&self) -> Result<InstanceClassLoaderKlassRef<'img>> {
        self.expect_kind(
            "InstanceClassLoaderKlass",
            self.kind()? == KlassKind::InstanceClassLoader,
        )?;
        Ok(InstanceClassLoaderKlassRef::from_klass(*self))
    }

    pub fn as_instance_stack_chunk_klass(&self) -> Result<InstanceStackChunkKlassRef<'img>> {
        self.expect_kind(
            "InstanceStackChunkKlass",
            self.kind()? == KlassKind::InstanceStackChunk,
        )?;
        Ok(InstanceStackChunkKlassRef::from_klass(*self))
    }

    pub fn as_array_klass(&self) -> Result<ArrayKlassRef<'img>> {
        self.expect_kind("ArrayKlass", self.kind()?.is_array())?;
        Ok(ArrayKlassRef::from_klass(*self))
    }

    pub fn as_obj_array_klass(&self) -> Result<ObjArrayKlassRef<'img>> {
        self.expect_kind("ObjArrayKlass", self.kind()? == KlassKind::ObjArray)?;
        Ok(ObjArrayKlassRef::from_klass(*self))
    }

    pub fn as_type_array_klass(&self) -> Result<TypeArrayKlassRef<'img>> {
        self.expect_kind("TypeArrayKlass", self.kind()? == KlassKind::TypeArray)?;
        Ok(TypeArrayKlassRef::from_klass(*self))
    }
}

impl fmt::Debug for KlassRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KlassRef({})", self.addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jtypes::PointerWidth;
    use crate::klass::ClassState;
    use crate::testutil::ImageBuilder;

    #[test]
    fn test_kind_and_fields() {
        let mut b = ImageBuilder::new();
        let k = b.alloc_meta("Klass");
        b.set_u32_field("Klass", "_kind", k, KlassKind::ObjArray as u32);
        b.set_i32_field("Klass", "_access_flags", k, 0x0011);
        b.set_u64_field("Klass", "_trace_id", k, 0xabcd);
        let image = b.build();

        let klass = image.klass_at(k).unwrap();
        assert_eq!(klass.kind().unwrap(), KlassKind::ObjArray);
        assert!(klass.access_flags().unwrap().is_final());
        assert_eq!(klass.trace_id().unwrap(), 0xabcd);
        assert_eq!(klass.name().unwrap(), None);
    }

    #[test]
    fn test_invalid_kind_is_fatal() {
        let mut b = ImageBuilder::new();
        let k = b.alloc_meta("Klass");
        b.set_u32_field("Klass", "_kind", k, 9);
        let image = b.build();

        assert!(matches!(
            image.klass_at(k),
            Err(ModelError::InvalidDiscriminator { family: "KlassKind", value: 9 })
        ));
    }

    #[test]
    fn test_narrowing_respects_tag() {
        let mut b = ImageBuilder::new();
        let k = b.alloc_meta("Klass");
        b.set_u32_field("Klass", "_kind", k, KlassKind::InstanceMirror as u32);
        let image = b.build();

        let klass = image.klass_at(k).unwrap();
        // Family narrowing accepts a refinement.
        assert!(klass.as_instance_klass().is_ok());
        assert!(klass.as_instance_mirror_klass().is_ok());
        // Wrong refinement and wrong family are rejected.
        assert!(matches!(
            klass.as_instance_ref_klass(),
            Err(ModelError::KindMismatch { expected: "InstanceRefKlass", .. })
        ));
        assert!(klass.as_obj_array_klass().is_err());
        assert!(klass.as_array_klass().is_err());
    }

    #[test]
    fn test_primary_super_bound() {
        let mut b = ImageBuilder::new();
        let k = b.alloc_meta("Klass");
        b.set_u32_field("Klass", "_kind", k, KlassKind::Instance as u32);
        let image = b.build();

        let klass = image.klass_at(k).unwrap();
        assert!(klass.primary_super(7).unwrap().is_none());
        assert!(matches!(
            klass.primary_super(8),
            Err(ModelError::BoundsViolation { index: 8, length: 8 })
        ));
    }

    #[test]
    fn test_subtype_primary_path() {
        let mut b = ImageBuilder::new();
        let profile = b.profile().clone();
        let parent = b.alloc_meta("InstanceKlass");
        let child = b.alloc_meta("InstanceKlass");
        for k in [parent, child] {
            b.set_u32_field("Klass", "_kind", k, KlassKind::Instance as u32);
            b.set_u8_field("InstanceKlass", "_init_state", k, ClassState::Loaded as u8);
        }
        let primary_base = profile.offset_of("Klass", "_primary_supers").unwrap();
        // Parent sits at depth 0; its check offset points into the
        // primary cache of any subtype.
        b.set_u32_field("Klass", "_super_check_offset", parent, primary_base as u32);
        b.poke_ptr(parent.as_u64() + primary_base, parent.as_u64());
        b.poke_ptr(child.as_u64() + primary_base, parent.as_u64());
        b.set_ptr_field("Klass", "super", child, parent.as_u64());
        let image = b.build();

        let parent = image.klass_at(parent).unwrap();
        let child = image.klass_at(child).unwrap();
        assert!(child.is_subtype_of(&parent).unwrap());
        assert!(parent.is_subtype_of(&parent).unwrap());
        assert!(!parent.is_subtype_of(&child).unwrap());
    }

    #[test]
    fn test_subtype_secondary_path() {
        let mut b = ImageBuilder::new();
        let profile = b.profile().clone();
        let iface = b.alloc_meta("InstanceKlass");
        let other_iface = b.alloc_meta("InstanceKlass");
        let impl_klass = b.alloc_meta("InstanceKlass");
        for k in [iface, other_iface, impl_klass] {
            b.set_u32_field("Klass", "_kind", k, KlassKind::Instance as u32);
        }
        let cache_offset = profile.offset_of("Klass", "_secondary_super_cache").unwrap();
        // Interfaces route every probe through the secondary tier.
        b.set_u32_field("Klass", "_super_check_offset", iface, cache_offset as u32);
        b.set_u32_field("Klass", "_super_check_offset", other_iface, cache_offset as u32);
        // Secondary supers array of the implementor: [iface].
        let word = PointerWidth::P64.bytes();
        let supers = b.alloc_raw(4 + word + word, 8);
        b.poke_i32(supers.as_u64(), 1);
        b.poke_ptr(supers.as_u64() + word, iface.as_u64());
        b.set_ptr_field("Klass", "_secondary_supers", impl_klass, supers.as_u64());
        let image = b.build();

        let iface = image.klass_at(iface).unwrap();
        let other_iface = image.klass_at(other_iface).unwrap();
        let impl_klass = image.klass_at(impl_klass).unwrap();
        assert!(impl_klass.is_subtype_of(&iface).unwrap());
        assert!(!impl_klass.is_subtype_of(&other_iface).unwrap());
    }
}
