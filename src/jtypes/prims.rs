// Tue Apr 14 2026 - Alex

//! Fixed-width aliases matching the names the target runtime's sources use.
//! Every other module spells field widths in this vocabulary so that a
//! layout table reads like the original declaration it mirrors.

#![allow(non_camel_case_types)]

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

pub type u1 = u8;
pub type u2 = u16;
pub type u4 = u32;
// u8 is taken by the Rust primitive; the 8-byte unsigned alias follows the
// signed naming instead.
pub type s1 = i8;
pub type s2 = i16;
pub type s4 = i32;
pub type s8 = i64;

pub type jbyte = i8;
pub type jboolean = u8;
pub type jchar = u16;
pub type jshort = i16;
pub type jushort = u16;
pub type jint = i32;
pub type juint = u32;
pub type jlong = i64;
pub type jfloat = f32;
pub type jdouble = f64;
pub type jsize = jint;

/// Pointer width of the target process. Always an explicit configuration
/// input; a silent host default would corrupt every computed offset for a
/// foreign-width capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerWidth {
    P32,
    P64,
}

impl PointerWidth {
    pub fn bytes(self) -> u64 {
        match self {
            Self::P32 => 4,
            Self::P64 => 8,
        }
    }

    pub fn bits(self) -> u32 {
        self.bytes() as u32 * 8
    }
}

/// The runtime's value-type tags, as they appear in array layout-helper
/// words and field descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BasicType {
    Boolean = 4,
    Char = 5,
    Float = 6,
    Double = 7,
    Byte = 8,
    Short = 9,
    Int = 10,
    Long = 11,
    Object = 12,
    Array = 13,
}

impl BasicType {
    pub fn element_bytes(self) -> Option<u64> {
        match self {
            Self::Boolean | Self::Byte => Some(1),
            Self::Char | Self::Short => Some(2),
            Self::Float | Self::Int => Some(4),
            Self::Double | Self::Long => Some(8),
            Self::Object | Self::Array => None,
        }
    }

    pub fn is_primitive(self) -> bool {
        !matches!(self, Self::Object | Self::Array)
    }
}

impl TryFrom<u8> for BasicType {
    type Error = ModelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            4 => Self::Boolean,
            5 => Self::Char,
            6 => Self::Float,
            7 => Self::Double,
            8 => Self::Byte,
            9 => Self::Short,
            10 => Self::Int,
            11 => Self::Long,
            12 => Self::Object,
            13 => Self::Array,
            _ => {
                return Err(ModelError::InvalidDiscriminator {
                    family: "BasicType",
                    value: value as u64,
                })
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_type_round_trip() {
        for raw in 4u8..=13 {
            let ty = BasicType::try_from(raw).unwrap();
            assert_eq!(ty as u8, raw);
        }
        assert!(BasicType::try_from(3).is_err());
        assert!(BasicType::try_from(14).is_err());
    }

    #[test]
    fn test_element_sizes() {
        assert_eq!(BasicType::Char.element_bytes(), Some(2));
        assert_eq!(BasicType::Long.element_bytes(), Some(8));
        assert_eq!(BasicType::Object.element_bytes(), None);
    }
}
