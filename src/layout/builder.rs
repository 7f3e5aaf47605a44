// Tue Apr 14 2026 - Alex

use crate::jtypes::PointerWidth;
use crate::layout::{FieldSpec, FieldType, TypeLayout};

/// Computes field offsets the way the producer compiler lays out a
/// single-inheritance C++ record: optional leading vtable-pointer slot,
/// base-class fields first at their base offsets, then declared fields at
/// natural alignment, with the total padded to the widest alignment.
pub struct LayoutBuilder {
    name: String,
    width: PointerWidth,
    has_vptr: bool,
    fields: Vec<FieldSpec>,
    cursor: u64,
    max_align: u64,
}

impl LayoutBuilder {
    pub fn new(name: impl Into<String>, width: PointerWidth) -> Self {
        Self {
            name: name.into(),
            width,
            has_vptr: false,
            fields: Vec::new(),
            cursor: 0,
            max_align: 1,
        }
    }

    /// Reserve the producer's vtable pointer at offset zero. Only valid on
    /// a root type; derived types inherit the slot through extends().
    pub fn with_vptr(mut self) -> Self {
        debug_assert!(self.fields.is_empty() && self.cursor == 0);
        self.has_vptr = true;
        self.cursor = self.width.bytes();
        self.max_align = self.max_align.max(self.width.bytes());
        self
    }

    /// Start from a base layout: its fields (already flattened) keep their
    /// offsets, and new fields are placed after the base's padded size.
    pub fn extends(mut self, base: &TypeLayout) -> Self {
        debug_assert!(self.fields.is_empty() && self.cursor == 0);
        debug_assert_eq!(base.width(), self.width);
        self.has_vptr = base.has_vptr();
        self.fields = base.fields().to_vec();
        self.cursor = base.size();
        self.max_align = self.max_align.max(base.alignment());
        self
    }

    pub fn field(mut self, name: &str, ty: FieldType) -> Self {
        let size = ty.size(self.width);
        let align = ty.alignment(self.width);
        let offset = align_up(self.cursor, align);
        self.fields.push(FieldSpec::new(name, ty, offset, size, align));
        self.cursor = offset + size;
        self.max_align = self.max_align.max(align);
        self
    }

    pub fn build(self) -> TypeLayout {
        let size = align_up(self.cursor, self.max_align);
        TypeLayout::from_parts(self.name, self.width, self.has_vptr, self.fields, size, self.max_align)
    }
}

fn align_up(value: u64, align: u64) -> u64 {
    (value + align - 1) & !(align - 1)
}
