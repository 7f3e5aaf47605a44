// Thu Apr 16 2026 - Alex

use crate::error::{ModelError, Result};
use crate::image::RuntimeImage;
use crate::klass::KlassRef;
use crate::memory::Address;
use std::fmt;

/// Allocation-accounting tag carried by the target's C-heap records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MemTag {
    JavaHeap = 0,
    Class = 1,
    Thread = 2,
    ThreadStack = 3,
    Code = 4,
    Gc = 5,
    GcCardSet = 6,
    Compiler = 7,
    Jvmci = 8,
    Internal = 9,
    Other = 10,
    Symbol = 11,
    Nmt = 12,
    ClassShared = 13,
    Chunk = 14,
    Test = 15,
    Tracing = 16,
    Logging = 17,
    Statistics = 18,
    Arguments = 19,
    Module = 20,
    Safepoint = 21,
    Synchronizer = 22,
    Serviceability = 23,
    Metaspace = 24,
    StringDedup = 25,
    ObjectMonitor = 26,
    None = 27,
}

impl MemTag {
    const ALL: [MemTag; 28] = [
        Self::JavaHeap,
        Self::Class,
        Self::Thread,
        Self::ThreadStack,
        Self::Code,
        Self::Gc,
        Self::GcCardSet,
        Self::Compiler,
        Self::Jvmci,
        Self::Internal,
        Self::Other,
        Self::Symbol,
        Self::Nmt,
        Self::ClassShared,
        Self::Chunk,
        Self::Test,
        Self::Tracing,
        Self::Logging,
        Self::Statistics,
        Self::Arguments,
        Self::Module,
        Self::Safepoint,
        Self::Synchronizer,
        Self::Serviceability,
        Self::Metaspace,
        Self::StringDedup,
        Self::ObjectMonitor,
        Self::None,
    ];
}

impl TryFrom<u32> for MemTag {
    type Error = ModelError;

    fn try_from(value: u32) -> Result<Self> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(ModelError::InvalidDiscriminator { family: "MemTag", value: value as u64 })
    }
}

const JNI_ID: &str = "JNIid";

/// Node of the JNI field-id list hanging off a class descriptor. C-heap
/// allocated, outside metaspace.
#[derive(Clone, Copy)]
pub struct JniIdRef<'img> {
    image: &'img RuntimeImage,
    addr: Address,
}

impl<'img> JniIdRef<'img> {
    pub(crate) fn new(image: &'img RuntimeImage, addr: Address) -> Self {
        Self { image, addr }
    }

    pub const MEM_TAG: MemTag = MemTag::Class;

    pub fn address(&self) -> Address {
        self.addr
    }

    pub fn holder(&self) -> Result<Option<KlassRef<'img>>> {
        let ptr = self.image.read_ptr_field(JNI_ID, "_holder", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image.klass_at(ptr)?))
    }

    pub fn next(&self) -> Result<Option<JniIdRef<'img>>> {
        let ptr = self.image.read_ptr_field(JNI_ID, "_next", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image.jni_id_at(ptr)?))
    }

    pub fn offset(&self) -> Result<i32> {
        self.image.read_i32_field(JNI_ID, "_offset", self.addr)
    }

    pub fn is_static_field_id(&self) -> Result<bool> {
        self.image.read_bool_field(JNI_ID, "_is_static_field_id", self.addr)
    }
}

impl fmt::Debug for JniIdRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JniIdRef({})", self.addr)
    }
}

const BUCKET: &str = "nmethodBucket";

/// Node of the dependent-compiled-method list attached to a class. Counts
/// are mutated concurrently on a live target.
#[derive(Clone, Copy)]
pub struct NmethodBucketRef<'img> {
    image: &'img RuntimeImage,
    addr: Address,
}

impl<'img> NmethodBucketRef<'img> {
    pub(crate) fn new(image: &'img RuntimeImage, addr: Address) -> Self {
        Self { image, addr }
    }

    pub const MEM_TAG: MemTag = MemTag::Class;

    pub fn address(&self) -> Address {
        self.addr
    }

    /// The dependent compiled method, left as a raw code-area pointer.
    pub fn nmethod(&self) -> Result<Address> {
        self.image.read_ptr_field(BUCKET, "_nmethod", self.addr)
    }

    pub fn count(&self) -> Result<i32> {
        self.image.read_i32_field(BUCKET, "_count", self.addr)
    }

    pub fn next(&self) -> Result<Option<NmethodBucketRef<'img>>> {
        let ptr = self.image.read_ptr_field(BUCKET, "_next", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image.nmethod_bucket_at(ptr)?))
    }

    pub fn purge_list_next(&self) -> Result<Option<NmethodBucketRef<'img>>> {
        let ptr = self.image.read_ptr_field(BUCKET, "_purge_list_next", self.addr)?;
        if ptr.is_null() {
            return Ok(None);
        }
        Ok(Some(self.image.nmethod_bucket_at(ptr)?))
    }
}

impl fmt::Debug for NmethodBucketRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NmethodBucketRef({})", self.addr)
    }
}
