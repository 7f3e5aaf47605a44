// Thu Apr 16 2026 - Alex

use crate::error::ModelError;
use std::fmt;

/// Self-description tag for metaspace records. The numbering matches the
/// target's enum; a record's tag is fixed at allocation and is the ground
/// truth the cast layer checks against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum MetaspaceObjType {
    Class = 0,
    Symbol = 1,
    TypeArrayU1 = 2,
    TypeArrayU2 = 3,
    TypeArrayU4 = 4,
    TypeArrayU8 = 5,
    TypeArrayOther = 6,
    Method = 7,
    ConstMethod = 8,
    MethodData = 9,
    ConstantPool = 10,
    ConstantPoolCache = 11,
    Annotations = 12,
    MethodCounters = 13,
    RecordComponent = 14,
}

pub const METASPACE_OBJ_TYPE_COUNT: u32 = 15;

impl MetaspaceObjType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Symbol => "Symbol",
            Self::TypeArrayU1 => "TypeArrayU1",
            Self::TypeArrayU2 => "TypeArrayU2",
            Self::TypeArrayU4 => "TypeArrayU4",
            Self::TypeArrayU8 => "TypeArrayU8",
            Self::TypeArrayOther => "TypeArrayOther",
            Self::Method => "Method",
            Self::ConstMethod => "ConstMethod",
            Self::MethodData => "MethodData",
            Self::ConstantPool => "ConstantPool",
            Self::ConstantPoolCache => "ConstantPoolCache",
            Self::Annotations => "Annotations",
            Self::MethodCounters => "MethodCounters",
            Self::RecordComponent => "RecordComponent",
        }
    }

    /// Registry name of the record's modeled layout, for the kinds this
    /// mirror carries a layout for.
    pub fn layout_name(self) -> Option<&'static str> {
        match self {
            Self::Class => Some("Klass"),
            Self::Symbol => Some("Symbol"),
            Self::Method => Some("Method"),
            Self::ConstMethod => Some("ConstMethod"),
            Self::MethodData => Some("MethodData"),
            Self::ConstantPool => Some("ConstantPool"),
            Self::ConstantPoolCache => Some("ConstantPoolCache"),
            Self::Annotations => Some("Annotations"),
            Self::RecordComponent => Some("RecordComponent"),
            _ => None,
        }
    }
}

impl TryFrom<u32> for MetaspaceObjType {
    type Error = ModelError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => Self::Class,
            1 => Self::Symbol,
            2 => Self::TypeArrayU1,
            3 => Self::TypeArrayU2,
            4 => Self::TypeArrayU4,
            5 => Self::TypeArrayU8,
            6 => Self::TypeArrayOther,
            7 => Self::Method,
            8 => Self::ConstMethod,
            9 => Self::MethodData,
            10 => Self::ConstantPool,
            11 => Self::ConstantPoolCache,
            12 => Self::Annotations,
            13 => Self::MethodCounters,
            14 => Self::RecordComponent,
            _ => {
                return Err(ModelError::InvalidDiscriminator {
                    family: "MetaspaceObj::Type",
                    value: value as u64,
                })
            }
        })
    }
}

impl fmt::Display for MetaspaceObjType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
