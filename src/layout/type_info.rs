// Tue Apr 14 2026 - Alex

use crate::jtypes::PointerWidth;
use std::fmt;

/// Width/alignment classification of a modeled field. Spelled in the
/// target runtime's own vocabulary so a declaration table reads like the
/// original header it mirrors; pointer-sized kinds resolve against the
/// configured width, never the host's.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Bool,
    U1,
    U2,
    U4,
    U8,
    S1,
    S2,
    S4,
    S8,
    /// Any pointer-sized slot: data pointers, code entry points, the
    /// klass/narrow-klass union in an object header.
    Pointer,
    /// The header mark word, a machine word on the target.
    Mark,
    /// A fixed-count inline array embedded in the record.
    InlineArray(Box<FieldType>, usize),
}

impl FieldType {
    pub fn size(&self, width: PointerWidth) -> u64 {
        match self {
            Self::Bool | Self::U1 | Self::S1 => 1,
            Self::U2 | Self::S2 => 2,
            Self::U4 | Self::S4 => 4,
            Self::U8 | Self::S8 => 8,
            Self::Pointer | Self::Mark => width.bytes(),
            Self::InlineArray(elem, count) => elem.size(width) * *count as u64,
        }
    }

    pub fn alignment(&self, width: PointerWidth) -> u64 {
        match self {
            Self::InlineArray(elem, _) => elem.alignment(width),
            _ => self.size(width),
        }
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, Self::Pointer)
    }

    pub fn array_of(elem: FieldType, count: usize) -> Self {
        Self::InlineArray(Box::new(elem), count)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => write!(f, "bool"),
            Self::U1 => write!(f, "u1"),
            Self::U2 => write!(f, "u2"),
            Self::U4 => write!(f, "u4"),
            Self::U8 => write!(f, "u8"),
            Self::S1 => write!(f, "s1"),
            Self::S2 => write!(f, "s2"),
            Self::S4 => write!(f, "s4"),
            Self::S8 => write!(f, "s8"),
            Self::Pointer => write!(f, "ptr"),
            Self::Mark => write!(f, "markWord"),
            Self::InlineArray(elem, count) => write!(f, "{}[{}]", elem, count),
        }
    }
}
