// Tue Apr 14 2026 - Alex

use crate::layout::FieldType;
use std::fmt;

/// One named field with its computed placement inside a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    name: String,
    ty: FieldType,
    offset: u64,
    size: u64,
    alignment: u64,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, ty: FieldType, offset: u64, size: u64, alignment: u64) -> Self {
        Self { name: name.into(), ty, offset, size, alignment }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &FieldType {
        &self.ty
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn alignment(&self) -> u64 {
        self.alignment
    }

    pub fn end_offset(&self) -> u64 {
        self.offset + self.size
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} @ 0x{:x}", self.ty, self.name, self.offset)
    }
}
