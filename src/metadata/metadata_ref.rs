// Thu Apr 16 2026 - Alex

use crate::error::{ModelError, Result};
use crate::image::RuntimeImage;
use crate::klass::KlassRef;
use crate::memory::Address;
use crate::metadata::{ConstantPoolRef, MetaspaceObjType, MethodDataRef, MethodRef};
use std::fmt;

/// Generic handle to a metaspace record of known provenance. The tag is
/// supplied where the pointer came from (a method-table element is a
/// Method, a constants link is a ConstantPool); predicates and narrowing
/// answer from that explicit tag. The producer's vtable pointer, the other
/// half of the record's self-description, is kept in the layouts for
/// offset fidelity but never dispatched through.
#[derive(Clone, Copy)]
pub struct MetadataRef<'img> {
    image: &'img RuntimeImage,
    addr: Address,
    ty: MetaspaceObjType,
}

impl<'img> MetadataRef<'img> {
    pub(crate) fn new(image: &'img RuntimeImage, addr: Address, ty: MetaspaceObjType) -> Self {
        Self { image, addr, ty }
    }

    pub fn address(&self) -> Address {
        self.addr
    }

    pub fn ty(&self) -> MetaspaceObjType {
        self.ty
    }

    pub fn internal_name(&self) -> &'static str {
        self.ty.name()
    }

    /// Address-derived hash, as the original computes it.
    pub fn identity_hash(&self) -> i32 {
        self.addr.as_u64() as i32
    }

    pub fn is_metadata(&self) -> bool {
        matches!(
            self.ty,
            MetaspaceObjType::Class
                | MetaspaceObjType::Method
                | MetaspaceObjType::MethodData
                | MetaspaceObjType::ConstantPool
        )
    }

    pub fn is_klass(&self) -> bool {
        self.ty == MetaspaceObjType::Class
    }

    pub fn is_method(&self) -> bool {
        self.ty == MetaspaceObjType::Method
    }

    pub fn is_method_data(&self) -> bool {
        self.ty == MetaspaceObjType::MethodData
    }

    pub fn is_constant_pool(&self) -> bool {
        self.ty == MetaspaceObjType::ConstantPool
    }

    pub fn is_method_counters(&self) -> bool {
        self.ty == MetaspaceObjType::MethodCounters
    }

    /// Record footprint in bytes, for the kinds that are self-sizing.
    /// Variable-body kinds without a size field report None.
    pub fn byte_size(&self) -> Result<Option<u64>> {
        match self.ty {
            MetaspaceObjType::Method => Ok(Some(self.image.profile().size_of("Method")?)),
            MetaspaceObjType::MethodData => {
                let md = MethodDataRef::new(self.image, self.addr);
                Ok(Some(md.size()? as u64))
            }
            MetaspaceObjType::ConstMethod => {
                let size_words = self
                    .image
                    .read_i32_field("ConstMethod", "_constMethod_size", self.addr)?;
                Ok(Some(size_words as u64 * self.image.word_size()))
            }
            MetaspaceObjType::ConstantPool => {
                let pool = ConstantPoolRef::new(self.image, self.addr);
                Ok(Some(pool.byte_size()?))
            }
            MetaspaceObjType::Symbol => {
                let symbol = crate::metadata::SymbolRef::new(self.image, self.addr);
                Ok(Some(symbol.byte_size()?))
            }
            _ => Ok(None),
        }
    }

    fn expect(&self, wanted: MetaspaceObjType) -> Result<()> {
        if self.ty == wanted {
            Ok(())
        } else {
            Err(ModelError::KindMismatch {
                expected: wanted.name(),
                found: self.ty.to_string(),
            })
        }
    }

    pub fn as_klass(&self) -> Result<KlassRef<'img>> {
        self.expect(MetaspaceObjType::Class)?;
        self.image.klass_at(self.addr)
    }

    pub fn as_method(&self) -> Result<MethodRef<'img>> {
        self.expect(MetaspaceObjType::Method)?;
        Ok(MethodRef::new(self.image, self.addr))
    }

    pub fn as_constant_pool(&self) -> Result<ConstantPoolRef<'img>> {
        self.expect(MetaspaceObjType::ConstantPool)?;
        Ok(ConstantPoolRef::new(self.image, self.addr))
    }

    pub fn as_method_data(&self) -> Result<MethodDataRef<'img>> {
        self.expect(MetaspaceObjType::MethodData)?;
        Ok(MethodDataRef::new(self.image, self.addr))
    }
}

impl fmt::Debug for MetadataRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MetadataRef({}, {})", self.ty, self.addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::ImageBuilder;

    #[test]
    fn test_predicates_follow_tag() {
        let mut b = ImageBuilder::new();
        let m = b.alloc_meta("Method");
        let image = b.build();

        let meta = image.metadata_at(m, MetaspaceObjType::Method).unwrap();
        assert!(meta.is_method());
        assert!(meta.is_metadata());
        assert!(!meta.is_constant_pool());
        assert!(!meta.is_klass());
        assert_eq!(meta.internal_name(), "Method");
    }

    #[test]
    fn test_narrowing_checks_tag() {
        let mut b = ImageBuilder::new();
        let m = b.alloc_meta("Method");
        let image = b.build();

        let meta = image.metadata_at(m, MetaspaceObjType::Method).unwrap();
        assert!(meta.as_method().is_ok());
        assert!(matches!(
            meta.as_constant_pool(),
            Err(ModelError::KindMismatch { expected: "ConstantPool", .. })
        ));
        assert!(meta.as_method_data().is_err());
        assert!(meta.as_klass().is_err());
    }

    #[test]
    fn test_sizes() {
        let mut b = ImageBuilder::new();
        let cm = b.alloc_meta("ConstMethod");
        b.set_i32_field("ConstMethod", "_constMethod_size", cm, 12);
        let md = b.alloc_meta("MethodData");
        b.set_i32_field("MethodData", "_size", md, 256);
        let ann = b.alloc_meta("Annotations");
        let image = b.build();

        let cm = image.metadata_at(cm, MetaspaceObjType::ConstMethod).unwrap();
        assert_eq!(cm.byte_size().unwrap(), Some(96));
        let md = image.metadata_at(md, MetaspaceObjType::MethodData).unwrap();
        assert_eq!(md.byte_size().unwrap(), Some(256));
        let ann = image.metadata_at(ann, MetaspaceObjType::Annotations).unwrap();
        assert_eq!(ann.byte_size().unwrap(), None);
        assert!(!ann.is_metadata());
    }
}
