// Fri Apr 17 2026 - Alex

use crate::error::{ModelError, Result};
use crate::image::RuntimeImage;
use crate::jtypes::{MarkWord, NarrowKlass, PointerWidth};
use crate::klass::{KlassKind, KlassRef};
use crate::memory::Address;
use crate::oop::variants::{ArrayOopRef, InstanceOopRef, ObjArrayOopRef, TypeArrayOopRef};
use crate::oop::StackChunkOopRef;
use std::fmt;

const TY: &str = "oopDesc";

/// Borrowed view of a heap object's header: the mark word and the class
/// reference, direct or compressed per the image configuration. Instance
/// state past the header lives at class-computed offsets and is addressed
/// through field_addr, not named fields. The backing region is owned and
/// moved by the target's collector; a view is only as stable as the
/// capture it reads from.
#[derive(Clone, Copy)]
pub struct OopRef<'img> {
    image: &'img RuntimeImage,
    addr: Address,
}

impl<'img> OopRef<'img> {
    pub(crate) fn new(image: &'img RuntimeImage, addr: Address) -> Self {
        Self { image, addr }
    }

    pub fn address(&self) -> Address {
        self.addr
    }

    pub(crate) fn image(&self) -> &'img RuntimeImage {
        self.image
    }

    /// Racy snapshot on a live target; the collector and locking both
    /// rewrite this word.
    pub fn mark(&self) -> Result<MarkWord> {
        let addr = self.image.field_addr(TY, "_mark", self.addr)?;
        let raw = match self.image.pointer_width() {
            PointerWidth::P32 => self.image.reader().read_u32(addr)? as u64,
            PointerWidth::P64 => self.image.reader().read_u64(addr)?,
        };
        Ok(MarkWord::from_raw(raw))
    }

    /// Address of the object's class descriptor, decoding the narrow form
    /// when the image uses compressed class pointers.
    pub fn klass_ptr(&self) -> Result<Address> {
        let slot = self.image.field_addr(TY, "_metadata", self.addr)?;
        if self.image.config().compressed_klass.is_some() {
            let narrow = NarrowKlass::from_raw(self.image.reader().read_u32(slot)?);
            self.image.resolve_narrow_klass(narrow)
        } else {
            self.image.read_ptr_at(slot)
        }
    }

    pub fn klass(&self) -> Result<KlassRef<'img>> {
        self.image.klass_at(self.klass_ptr()?)
    }

    pub fn kind(&self) -> Result<KlassKind> {
        self.klass()?.kind()
    }

    /// Bytes from the object start to the first post-header byte: smaller
    /// with compressed class pointers, where the narrow half-word is the
    /// end of the header.
    pub fn header_bytes(&self) -> Result<u64> {
        let metadata_offset = self.image.profile().offset_of(TY, "_metadata")?;
        if self.image.config().compressed_klass.is_some() {
            Ok(metadata_offset + 4)
        } else {
            Ok(metadata_offset + self.image.word_size())
        }
    }

    /// Address of an instance field at a class-computed offset.
    pub fn field_addr(&self, offset: u64) -> Address {
        self.addr + offset
    }

    pub fn is_instance(&self) -> Result<bool> {
        Ok(self.kind()?.is_instance_family())
    }

    pub fn is_array(&self) -> Result<bool> {
        Ok(self.kind()?.is_array())
    }

    fn expect_kind(&self, wanted: &'static str, ok: bool, found: KlassKind) -> Result<()> {
        if ok {
            Ok(())
        } else {
            Err(ModelError::KindMismatch { expected: wanted, found: found.to_string() })
        }
    }

    pub fn as_instance(&self) -> Result<InstanceOopRef<'img>> {
        let kind = self.kind()?;
        self.expect_kind("instanceOop", kind.is_instance_family(), kind)?;
        Ok(InstanceOopRef::from_oop(*self))
    }

    pub fn as_array(&self) -> Result<ArrayOopRef<'img>> {
        let kind = self.kind()?;
        self.expect_kind("arrayOop", kind.is_array(), kind)?;
        Ok(ArrayOopRef::from_oop(*self))
    }

    pub fn as_obj_array(&self) -> Result<ObjArrayOopRef<'img>> {
        let kind = self.kind()?;
        self.expect_kind("objArrayOop", kind == KlassKind::ObjArray, kind)?;
        Ok(ObjArrayOopRef::from_oop(*self))
    }

    pub fn as_type_array(&self) -> Result<TypeArrayOopRef<'img>> {
        let kind = self.kind()?;
        self.expect_kind("typeArrayOop", kind == KlassKind::TypeArray, kind)?;
        Ok(TypeArrayOopRef::from_oop(*self))
    }

    pub fn as_stack_chunk(&self) -> Result<StackChunkOopRef<'img>> {
        let kind = self.kind()?;
        self.expect_kind("stackChunkOop", kind == KlassKind::InstanceStackChunk, kind)?;
        Ok(StackChunkOopRef::from_oop(*self))
    }
}

impl fmt::Debug for OopRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OopRef({})", self.addr)
    }
}

/// Reinterpret a raw address as a heap-object view. No validation at all:
/// whether the address actually holds an object header is entirely the
/// caller's contract. The checked path is RuntimeImage::oop_at.
pub fn cast_to_oop(image: &RuntimeImage, addr: Address) -> OopRef<'_> {
    OopRef::new(image, addr)
}

/// The inverse reinterpretation; lossless for any address.
pub fn cast_from_oop(oop: &OopRef<'_>) -> Address {
    oop.address()
}
