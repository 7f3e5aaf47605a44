// Wed Apr 15 2026 - Alex

use crate::error::{ModelError, Result};
use crate::klass::array::ObjArrayKlassRef;
use crate::klass::{ClassState, InstanceKlassFlags, KlassRef, ReferenceType};
use crate::memory::Address;
use crate::metadata::{
    AnnotationsRef, ConstantPoolRef, JniIdRef, MetaArray, MethodRef, NmethodBucketRef,
    RecordComponentRef,
};
use std::fmt;
use std::ops::Deref;

const TY: &str = "InstanceKlass";

const SOURCE_DEBUG_EXTENSION_MAX: usize = 4096;

/// Descriptor of a class or interface: the root descriptor plus the full
/// class description (tables, interface lists, nest/record metadata, the
/// initialization state machine and its side records).
#[derive(Clone, Copy)]
pub struct InstanceKlassRef<'img> {
    klass: KlassRef<'img>,
}

impl<'img> InstanceKlassRef<'img> {
    pub(crate) fn from_klass(klass: KlassRef<'img>) -> Self {
        Self { klass }
    }

    pub fn klass(&self) -> &KlassRef<'img> {
        &self.klass
    }

    fn ptr_field(&self, field: &str) -> Result<Address> {
        self.image().read_ptr_field(TY, field, self.address())
    }

    fn opt_array<T: crate::metadata::MetaElement>(
        &self,
        field: &str,
    ) -> Result<Option<MetaArray<'img, T>>> {
        let ptr = self.ptr_field(field)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(MetaArray::new(self.image(), ptr)))
    }

    pub fn annotations(&self) -> Result<Option<AnnotationsRef<'img>>> {
        let ptr = self.ptr_field("_annotations")?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image().annotations_at(ptr)?))
    }

    pub fn package_entry(&self) -> Result<Address> {
        self.ptr_field("_package_entry")
    }

    /// The one-dimensional object-array class over this class, if the
    /// runtime has created it.
    pub fn array_klasses(&self) -> Result<Option<ObjArrayKlassRef<'img>>> {
        let ptr = self.ptr_field("_array_klasses")?;
        if ptr.is_null() {
            return Ok(None);
        }
        self.image().klass_at(ptr)?.as_obj_array_klass().map(Some)
    }

    pub fn constants(&self) -> Result<Option<ConstantPoolRef<'img>>> {
        let ptr = self.ptr_field("_constants")?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image().constant_pool_at(ptr)?))
    }

    pub fn inner_classes(&self) -> Result<Option<MetaArray<'img, u16>>> {
        self.opt_array("_inner_classes")
    }

    pub fn nest_members(&self) -> Result<Option<MetaArray<'img, u16>>> {
        self.opt_array("_nest_members")
    }

    pub fn nest_host(&self) -> Result<Option<InstanceKlassRef<'img>>> {
        let ptr = self.ptr_field("_nest_host")?;
        if ptr.is_null() {
            return Ok(None);
        }
        self.image().klass_at(ptr)?.as_instance_klass().map(Some)
    }

    pub fn permitted_subclasses(&self) -> Result<Option<MetaArray<'img, u16>>> {
        self.opt_array("_permitted_subclasses")
    }

    pub fn record_components(&self) -> Result<Option<MetaArray<'img, Address>>> {
        self.opt_array("_record_components")
    }

    pub fn record_component(&self, index: usize) -> Result<RecordComponentRef<'img>> {
        let components = self
            .record_components()?
            .ok_or(ModelError::NullPointer("RecordComponent array"))?;
        let ptr = components.get(index)?;
        self.image().record_component_at(ptr)
    }

    pub fn source_debug_extension(&self) -> Result<Option<String>> {
        let ptr = self.ptr_field("_source_debug_extension")?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image().reader().read_c_string(ptr, SOURCE_DEBUG_EXTENSION_MAX)?))
    }

    pub fn nonstatic_field_size(&self) -> Result<i32> {
        self.image().read_i32_field(TY, "_nonstatic_field_size", self.address())
    }

    pub fn static_field_size(&self) -> Result<i32> {
        self.image().read_i32_field(TY, "_static_field_size", self.address())
    }

    pub fn nonstatic_oop_map_size(&self) -> Result<i32> {
        self.image().read_i32_field(TY, "_nonstatic_oop_map_size", self.address())
    }

    pub fn itable_len(&self) -> Result<i32> {
        self.image().read_i32_field(TY, "_itable_len", self.address())
    }

    pub fn nest_host_index(&self) -> Result<u16> {
        self.image().read_u16_field(TY, "_nest_host_index", self.address())
    }

    pub fn this_class_index(&self) -> Result<u16> {
        self.image().read_u16_field(TY, "_this_class_index", self.address())
    }

    pub fn static_oop_field_count(&self) -> Result<u16> {
        self.image().read_u16_field(TY, "_static_oop_field_count", self.address())
    }

    pub fn idnum_allocated_count(&self) -> Result<u16> {
        self.image().read_u16_field(TY, "_idnum_allocated_count", self.address())
    }

    pub fn is_marked_dependant(&self) -> Result<bool> {
        self.image().read_bool_field(TY, "_is_marked_dependant", self.address())
    }

    /// Current initialization state. On a live target this advances
    /// concurrently; treat as a snapshot.
    pub fn init_state(&self) -> Result<ClassState> {
        let raw = self.image().read_u8_field(TY, "_init_state", self.address())?;
        ClassState::try_from(raw)
    }

    pub fn is_initialized(&self) -> Result<bool> {
        Ok(self.init_state()?.is_initialized())
    }

    pub fn is_linked(&self) -> Result<bool> {
        Ok(self.init_state()?.is_linked())
    }

    pub fn reference_type(&self) -> Result<ReferenceType> {
        let raw = self.image().read_u16_field(TY, "_reference_type", self.address())?;
        ReferenceType::try_from(raw)
    }

    pub fn misc_flags(&self) -> Result<InstanceKlassFlags> {
        let raw = self.image().read_u16_field(TY, "_misc_flags", self.address())?;
        Ok(InstanceKlassFlags::from_raw(raw))
    }

    pub fn is_rewritten(&self) -> Result<bool> {
        Ok(self.misc_flags()?.contains(InstanceKlassFlags::REWRITTEN))
    }

    pub fn has_been_redefined(&self) -> Result<bool> {
        Ok(self.misc_flags()?.contains(InstanceKlassFlags::HAS_BEEN_REDEFINED))
    }

    pub fn init_monitor(&self) -> Result<Address> {
        self.ptr_field("_init_monitor")
    }

    pub fn init_thread(&self) -> Result<Address> {
        self.ptr_field("_init_thread")
    }

    pub fn oop_map_cache(&self) -> Result<Address> {
        self.ptr_field("_oop_map_cache")
    }

    /// Head of the JNI field-id list, walkable through JniIdRef::next.
    pub fn jni_ids(&self) -> Result<Option<JniIdRef<'img>>> {
        let ptr = self.ptr_field("_jni_ids")?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image().jni_id_at(ptr)?))
    }

    pub fn methods_jmethod_ids(&self) -> Result<Address> {
        self.ptr_field("_methods_jmethod_ids")
    }

    /// Head of the dependent-nmethod list.
    pub fn dep_context(&self) -> Result<Option<NmethodBucketRef<'img>>> {
        let ptr = self.ptr_field("_dep_context")?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image().nmethod_bucket_at(ptr)?))
    }

    pub fn dep_context_last_cleaned(&self) -> Result<u64> {
        self.image().read_u64_field(TY, "_dep_context_last_cleaned", self.address())
    }

    pub fn osr_nmethods_head(&self) -> Result<Address> {
        self.ptr_field("_osr_nmethods_head")
    }

    pub fn breakpoints(&self) -> Result<Address> {
        self.ptr_field("_breakpoints")
    }

    pub fn previous_versions(&self) -> Result<Option<InstanceKlassRef<'img>>> {
        let ptr = self.ptr_field("_previous_versions")?;
        if ptr.is_null() {
            return Ok(None);
        }
        self.image().klass_at(ptr)?.as_instance_klass().map(Some)
    }

    pub fn cached_class_file(&self) -> Result<Address> {
        self.ptr_field("_cached_class_file")
    }

    pub fn jvmti_cached_class_field_map(&self) -> Result<Address> {
        self.ptr_field("_jvmti_cached_class_field_map")
    }

    pub fn methods(&self) -> Result<Option<MetaArray<'img, Address>>> {
        self.opt_array("_methods")
    }

    /// Method table entry as a typed view.
    pub fn method(&self, index: usize) -> Result<MethodRef<'img>> {
        let methods = self.methods()?.ok_or(ModelError::NullPointer("Method array"))?;
        let ptr = methods.get(index)?;
        self.image().method_at(ptr)
    }

    pub fn default_methods(&self) -> Result<Option<MetaArray<'img, Address>>> {
        self.opt_array("_default_methods")
    }

    pub fn local_interfaces(&self) -> Result<Option<MetaArray<'img, Address>>> {
        self.opt_array("_local_interfaces")
    }

    pub fn transitive_interfaces(&self) -> Result<Option<MetaArray<'img, Address>>> {
        self.opt_array("_transitive_interfaces")
    }

    pub fn method_ordering(&self) -> Result<Option<MetaArray<'img, i32>>> {
        self.opt_array("_method_ordering")
    }

    pub fn default_vtable_indices(&self) -> Result<Option<MetaArray<'img, i32>>> {
        self.opt_array("_default_vtable_indices")
    }

    /// The packed field-descriptor stream.
    pub fn field_stream(&self) -> Result<Option<MetaArray<'img, u16>>> {
        self.opt_array("fields")
    }
}

impl<'img> Deref for InstanceKlassRef<'img> {
    type Target = KlassRef<'img>;

    fn deref(&self) -> &Self::Target {
        &self.klass
    }
}

impl fmt::Debug for InstanceKlassRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstanceKlassRef({})", self.address())
    }
}

/// Descriptor of java.lang.Class instances; static fields of the mirrored
/// class live inside the mirror object at a per-build offset.
#[derive(Clone, Copy, Debug)]
pub struct InstanceMirrorKlassRef<'img> {
    instance: InstanceKlassRef<'img>,
}

impl<'img> InstanceMirrorKlassRef<'img> {
    pub(crate) fn from_klass(klass: KlassRef<'img>) -> Self {
        Self { instance: InstanceKlassRef::from_klass(klass) }
    }

    /// Static-field start offset inside a mirror object, a per-build
    /// config input.
    pub fn static_fields_offset(&self) -> Result<u64> {
        self.image()
            .config()
            .mirror_static_fields_offset
            .ok_or(ModelError::Unconfigured("mirror static-field offset"))
    }
}

impl<'img> Deref for InstanceMirrorKlassRef<'img> {
    type Target = InstanceKlassRef<'img>;

    fn deref(&self) -> &Self::Target {
        &self.instance
    }
}

/// Descriptor of java.lang.ref.Reference subclasses.
#[derive(Clone, Copy, Debug)]
pub struct InstanceRefKlassRef<'img> {
    instance: InstanceKlassRef<'img>,
}

impl<'img> InstanceRefKlassRef<'img> {
    pub(crate) fn from_klass(klass: KlassRef<'img>) -> Self {
        Self { instance: InstanceKlassRef::from_klass(klass) }
    }
}

impl<'img> Deref for InstanceRefKlassRef<'img> {
    type Target = InstanceKlassRef<'img>;

    fn deref(&self) -> &Self::Target {
        &self.instance
    }
}

/// Descriptor of java.lang.ClassLoader subclasses.
#[derive(Clone, Copy, Debug)]
pub struct InstanceClassLoaderKlassRef<'img> {
    instance: InstanceKlassRef<'img>,
}

impl<'img> InstanceClassLoaderKlassRef<'img> {
    pub(crate) fn from_klass(klass: KlassRef<'img>) -> Self {
        Self { instance: InstanceKlassRef::from_klass(klass) }
    }
}

impl<'img> Deref for InstanceClassLoaderKlassRef<'img> {
    type Target = InstanceKlassRef<'img>;

    fn deref(&self) -> &Self::Target {
        &self.instance
    }
}

/// Descriptor of continuation stack-chunk objects.
#[derive(Clone, Copy, Debug)]
pub struct InstanceStackChunkKlassRef<'img> {
    instance: InstanceKlassRef<'img>,
}

impl<'img> InstanceStackChunkKlassRef<'img> {
    pub(crate) fn from_klass(klass: KlassRef<'img>) -> Self {
        Self { instance: InstanceKlassRef::from_klass(klass) }
    }

    /// Stack start offset inside a chunk object, a per-build config input.
    pub fn stack_offset(&self) -> Result<u64> {
        self.image()
            .config()
            .stack_chunk_stack_offset
            .ok_or(ModelError::Unconfigured("stack-chunk stack offset"))
    }
}

impl<'img> Deref for InstanceStackChunkKlassRef<'img> {
    type Target = InstanceKlassRef<'img>;

    fn deref(&self) -> &Self::Target {
        &self.instance
    }
}
