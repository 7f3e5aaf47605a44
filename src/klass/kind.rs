// Wed Apr 15 2026 - Alex

use crate::error::ModelError;
use std::fmt;

/// The closed set of concrete descriptor kinds. Set once by the runtime at
/// descriptor creation and immutable afterwards; every narrowing in the
/// cast layer goes through this tag. Numbering matches the target's enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum KlassKind {
    Instance = 0,
    InstanceRef = 1,
    InstanceMirror = 2,
    InstanceClassLoader = 3,
    InstanceStackChunk = 4,
    TypeArray = 5,
    ObjArray = 6,
}

pub const KLASS_KIND_COUNT: u32 = 7;

impl KlassKind {
    /// All four refinements of a plain instance class count as the
    /// instance family; narrowing to InstanceKlass accepts any of them.
    pub fn is_instance_family(self) -> bool {
        matches!(
            self,
            Self::Instance
                | Self::InstanceRef
                | Self::InstanceMirror
                | Self::InstanceClassLoader
                | Self::InstanceStackChunk
        )
    }

    pub fn is_array(self) -> bool {
        matches!(self, Self::TypeArray | Self::ObjArray)
    }

    /// Registry name of the concrete descriptor type this tag selects.
    pub fn type_name(self) -> &'static str {
        match self {
            Self::Instance => "InstanceKlass",
            Self::InstanceRef => "InstanceRefKlass",
            Self::InstanceMirror => "InstanceMirrorKlass",
            Self::InstanceClassLoader => "InstanceClassLoaderKlass",
            Self::InstanceStackChunk => "InstanceStackChunkKlass",
            Self::TypeArray => "TypeArrayKlass",
            Self::ObjArray => "ObjArrayKlass",
        }
    }
}

impl TryFrom<u32> for KlassKind {
    type Error = ModelError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Instance,
            1 => Self::InstanceRef,
            2 => Self::InstanceMirror,
            3 => Self::InstanceClassLoader,
            4 => Self::InstanceStackChunk,
            5 => Self::TypeArray,
            6 => Self::ObjArray,
            _ => {
                return Err(ModelError::InvalidDiscriminator {
                    family: "KlassKind",
                    value: value as u64,
                })
            }
        })
    }
}

impl fmt::Display for KlassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.type_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_set() {
        for raw in 0..KLASS_KIND_COUNT {
            let kind = KlassKind::try_from(raw).unwrap();
            assert_eq!(kind as u32, raw);
        }
        assert!(matches!(
            KlassKind::try_from(7),
            Err(ModelError::InvalidDiscriminator { family: "KlassKind", value: 7 })
        ));
        assert!(KlassKind::try_from(u32::MAX).is_err());
    }

    #[test]
    fn test_families() {
        assert!(KlassKind::Instance.is_instance_family());
        assert!(KlassKind::InstanceStackChunk.is_instance_family());
        assert!(!KlassKind::TypeArray.is_instance_family());
        assert!(KlassKind::ObjArray.is_array());
        assert!(!KlassKind::InstanceMirror.is_array());
    }
}
