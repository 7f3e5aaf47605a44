// Wed Apr 15 2026 - Alex

use crate::config::ImageConfig;
use crate::error::{ModelError, Result};
use crate::jtypes::{NarrowKlass, NarrowOop, PointerWidth};
use crate::klass::KlassRef;
use crate::layout::LayoutProfile;
use crate::memory::{Address, MemoryReader};
use crate::metadata::{
    AnnotationsRef, ConstMethodRef, ConstantPoolCacheRef, ConstantPoolRef, JniIdRef, MetadataRef,
    MetaspaceObjType, MethodDataRef, MethodRef, NmethodBucketRef, RecordComponentRef, SymbolRef,
};
use crate::oop::OopRef;
use std::sync::Arc;

/// One captured target instance: the reader that owns its bytes, the
/// per-instance configuration, and the layout profile to interpret it
/// with. Every typed view borrows an image, and nothing in the crate is
/// process-global, so any number of captures can be inspected at once.
pub struct RuntimeImage {
    reader: Arc<dyn MemoryReader>,
    config: ImageConfig,
    profile: LayoutProfile,
}

impl RuntimeImage {
    pub fn new(reader: Arc<dyn MemoryReader>, config: ImageConfig) -> Self {
        let profile = LayoutProfile::build(config.pointer_width);
        log::debug!(
            "runtime image opened: target '{}', {:?}, {} regions",
            config.version_label,
            config.pointer_width,
            reader.regions().len()
        );
        Self { reader, config, profile }
    }

    /// Open with a hand-built or deserialized profile instead of the
    /// built-in tables, for a target build whose layouts diverge.
    pub fn with_profile(
        reader: Arc<dyn MemoryReader>,
        config: ImageConfig,
        profile: LayoutProfile,
    ) -> Self {
        Self { reader, config, profile }
    }

    pub fn reader(&self) -> &dyn MemoryReader {
        self.reader.as_ref()
    }

    pub fn config(&self) -> &ImageConfig {
        &self.config
    }

    pub fn profile(&self) -> &LayoutProfile {
        &self.profile
    }

    pub fn pointer_width(&self) -> PointerWidth {
        self.config.pointer_width
    }

    pub fn word_size(&self) -> u64 {
        self.config.pointer_width.bytes()
    }

    /// Read a pointer-sized slot at the target's width.
    pub fn read_ptr_at(&self, addr: Address) -> Result<Address> {
        let value = match self.config.pointer_width {
            PointerWidth::P32 => self.reader.read_u32(addr)? as u64,
            PointerWidth::P64 => self.reader.read_u64(addr)?,
        };
        Ok(Address::new(value))
    }

    pub(crate) fn field_addr(&self, type_name: &str, field: &str, base: Address) -> Result<Address> {
        let offset = self.profile.offset_of(type_name, field)?;
        Ok(base + offset)
    }

    pub(crate) fn read_ptr_field(&self, type_name: &str, field: &str, base: Address) -> Result<Address> {
        let addr = self.field_addr(type_name, field, base)?;
        self.read_ptr_at(addr)
    }

    pub(crate) fn read_u8_field(&self, type_name: &str, field: &str, base: Address) -> Result<u8> {
        Ok(self.reader.read_u8(self.field_addr(type_name, field, base)?)?)
    }

    pub(crate) fn read_u16_field(&self, type_name: &str, field: &str, base: Address) -> Result<u16> {
        Ok(self.reader.read_u16(self.field_addr(type_name, field, base)?)?)
    }

    pub(crate) fn read_u32_field(&self, type_name: &str, field: &str, base: Address) -> Result<u32> {
        Ok(self.reader.read_u32(self.field_addr(type_name, field, base)?)?)
    }

    pub(crate) fn read_u64_field(&self, type_name: &str, field: &str, base: Address) -> Result<u64> {
        Ok(self.reader.read_u64(self.field_addr(type_name, field, base)?)?)
    }

    pub(crate) fn read_i16_field(&self, type_name: &str, field: &str, base: Address) -> Result<i16> {
        Ok(self.reader.read_i16(self.field_addr(type_name, field, base)?)?)
    }

    pub(crate) fn read_i32_field(&self, type_name: &str, field: &str, base: Address) -> Result<i32> {
        Ok(self.reader.read_i32(self.field_addr(type_name, field, base)?)?)
    }

    pub(crate) fn read_bool_field(&self, type_name: &str, field: &str, base: Address) -> Result<bool> {
        Ok(self.read_u8_field(type_name, field, base)? != 0)
    }

    fn check_heap_addr(&self, addr: Address, what: &'static str) -> Result<()> {
        if addr.is_null() {
            return Err(ModelError::NullPointer(what));
        }
        if !addr.is_aligned(self.config.object_alignment as usize) {
            log::warn!("{} at unaligned address {}", what, addr);
        }
        if let Some(heap) = &self.config.heap {
            if !heap.contains(addr) {
                return Err(ModelError::Memory(crate::memory::MemoryError::Unmapped(
                    addr.as_u64(),
                )));
            }
        }
        Ok(())
    }

    fn check_meta_addr(&self, addr: Address, what: &'static str) -> Result<()> {
        if addr.is_null() {
            return Err(ModelError::NullPointer(what));
        }
        if let Some(metaspace) = &self.config.metaspace {
            if !metaspace.contains(addr) && !self.is_shared_metaspace(addr) {
                return Err(ModelError::Memory(crate::memory::MemoryError::Unmapped(
                    addr.as_u64(),
                )));
            }
        }
        Ok(())
    }

    /// Checked entry point for a heap object. For the raw reinterpretation
    /// with no checks, use oop::cast_to_oop.
    pub fn oop_at(&self, addr: Address) -> Result<OopRef<'_>> {
        self.check_heap_addr(addr, "oop")?;
        Ok(OopRef::new(self, addr))
    }

    /// Checked entry point for a type descriptor. Reads and validates the
    /// kind tag immediately: a descriptor with an out-of-range tag is a
    /// corrupt or version-mismatched capture and fails here.
    pub fn klass_at(&self, addr: Address) -> Result<KlassRef<'_>> {
        self.check_meta_addr(addr, "Klass")?;
        let klass = KlassRef::new(self, addr);
        klass.kind()?;
        Ok(klass)
    }

    /// Generic metadata handle. The caller supplies the record kind its
    /// pointer's provenance implies; narrowing re-checks it.
    pub fn metadata_at(&self, addr: Address, ty: MetaspaceObjType) -> Result<MetadataRef<'_>> {
        self.check_meta_addr(addr, "Metadata")?;
        Ok(MetadataRef::new(self, addr, ty))
    }

    pub fn method_at(&self, addr: Address) -> Result<MethodRef<'_>> {
        self.check_meta_addr(addr, "Method")?;
        Ok(MethodRef::new(self, addr))
    }

    pub fn const_method_at(&self, addr: Address) -> Result<ConstMethodRef<'_>> {
        self.check_meta_addr(addr, "ConstMethod")?;
        Ok(ConstMethodRef::new(self, addr))
    }

    pub fn constant_pool_at(&self, addr: Address) -> Result<ConstantPoolRef<'_>> {
        self.check_meta_addr(addr, "ConstantPool")?;
        Ok(ConstantPoolRef::new(self, addr))
    }

    pub fn constant_pool_cache_at(&self, addr: Address) -> Result<ConstantPoolCacheRef<'_>> {
        self.check_meta_addr(addr, "ConstantPoolCache")?;
        Ok(ConstantPoolCacheRef::new(self, addr))
    }

    pub fn method_data_at(&self, addr: Address) -> Result<MethodDataRef<'_>> {
        self.check_meta_addr(addr, "MethodData")?;
        Ok(MethodDataRef::new(self, addr))
    }

    pub fn symbol_at(&self, addr: Address) -> Result<SymbolRef<'_>> {
        self.check_meta_addr(addr, "Symbol")?;
        Ok(SymbolRef::new(self, addr))
    }

    pub fn annotations_at(&self, addr: Address) -> Result<AnnotationsRef<'_>> {
        self.check_meta_addr(addr, "Annotations")?;
        Ok(AnnotationsRef::new(self, addr))
    }

    pub fn record_component_at(&self, addr: Address) -> Result<RecordComponentRef<'_>> {
        self.check_meta_addr(addr, "RecordComponent")?;
        Ok(RecordComponentRef::new(self, addr))
    }

    /// C-heap records live outside metaspace; only null is rejected.
    pub fn jni_id_at(&self, addr: Address) -> Result<JniIdRef<'_>> {
        if addr.is_null() {
            return Err(ModelError::NullPointer("JNIid"));
        }
        Ok(JniIdRef::new(self, addr))
    }

    pub fn nmethod_bucket_at(&self, addr: Address) -> Result<NmethodBucketRef<'_>> {
        if addr.is_null() {
            return Err(ModelError::NullPointer("nmethodBucket"));
        }
        Ok(NmethodBucketRef::new(self, addr))
    }

    pub fn resolve_narrow_oop(&self, narrow: NarrowOop) -> Result<Address> {
        let encoding = self
            .config
            .compressed_oops
            .ok_or(ModelError::Unconfigured("compressed oop encoding"))?;
        Ok(encoding.decode_oop(narrow))
    }

    pub fn encode_narrow_oop(&self, addr: Address) -> Result<NarrowOop> {
        let encoding = self
            .config
            .compressed_oops
            .ok_or(ModelError::Unconfigured("compressed oop encoding"))?;
        encoding.encode_oop(addr)
    }

    pub fn resolve_narrow_klass(&self, narrow: NarrowKlass) -> Result<Address> {
        let encoding = self
            .config
            .compressed_klass
            .ok_or(ModelError::Unconfigured("compressed klass encoding"))?;
        Ok(encoding.decode_klass(narrow))
    }

    pub fn encode_narrow_klass(&self, addr: Address) -> Result<NarrowKlass> {
        let encoding = self
            .config
            .compressed_klass
            .ok_or(ModelError::Unconfigured("compressed klass encoding"))?;
        encoding.encode_klass(addr)
    }

    /// Entry of the target's VM-intrinsic symbol pointer table.
    pub fn vm_symbol(&self, index: usize) -> Result<SymbolRef<'_>> {
        let table = self
            .config
            .vm_symbols
            .ok_or(ModelError::Unconfigured("VM symbol table"))?;
        let slot = Address::new(table) + index as u64 * self.word_size();
        let symbol = self.read_ptr_at(slot)?;
        if symbol.is_null() {
            return Err(ModelError::NullPointer("Symbol"));
        }
        self.symbol_at(symbol)
    }

    pub fn is_shared_metaspace(&self, addr: Address) -> bool {
        self.config
            .shared_metaspace
            .map(|bounds| bounds.contains(addr))
            .unwrap_or(false)
    }
}
