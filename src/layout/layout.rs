// Tue Apr 14 2026 - Alex

use crate::jtypes::PointerWidth;
use crate::layout::FieldSpec;
use std::collections::HashMap;
use std::fmt;

/// Computed layout of one modeled record type. Inherited fields are
/// flattened in, so a derived type resolves its base's field names at the
/// base's offsets.
#[derive(Debug, Clone)]
pub struct TypeLayout {
    name: String,
    width: PointerWidth,
    has_vptr: bool,
    fields: Vec<FieldSpec>,
    field_map: HashMap<String, usize>,
    size: u64,
    alignment: u64,
}

impl TypeLayout {
    pub(crate) fn from_parts(
        name: String,
        width: PointerWidth,
        has_vptr: bool,
        fields: Vec<FieldSpec>,
        size: u64,
        alignment: u64,
    ) -> Self {
        let field_map = fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name().to_string(), i))
            .collect();
        Self { name, width, has_vptr, fields, field_map, size, alignment }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn width(&self) -> PointerWidth {
        self.width
    }

    /// Whether the record starts with the producer compiler's vtable
    /// pointer slot. Kept for offset fidelity only; dispatch through a
    /// foreign vtable is never reconstructed.
    pub fn has_vptr(&self) -> bool {
        self.has_vptr
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.field_map.get(name).map(|&i| &self.fields[i])
    }

    pub fn offset_of(&self, name: &str) -> Option<u64> {
        self.field(name).map(|f| f.offset())
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn alignment(&self) -> u64 {
        self.alignment
    }
}

impl fmt::Display for TypeLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({} bytes, align {}) {{", self.name, self.size, self.alignment)?;
        for field in &self.fields {
            writeln!(f, "  {}", field)?;
        }
        write!(f, "}}")
    }
}
