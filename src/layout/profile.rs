// Tue Apr 14 2026 - Alex

use crate::jtypes::PointerWidth;
use crate::layout::decl::MODEL_TYPES;
use crate::layout::{LayoutBuilder, LayoutError, TypeLayout};
use indexmap::IndexMap;

/// The full set of computed layouts for one target configuration. Built
/// from the declaration tables for a pointer width, or deserialized from a
/// captured reference when a target build diverges from the built-in
/// tables. Profiles are immutable once handed to a RuntimeImage; swap the
/// whole profile to change versions.
#[derive(Debug, Clone)]
pub struct LayoutProfile {
    width: PointerWidth,
    types: IndexMap<String, TypeLayout>,
}

impl LayoutProfile {
    pub fn build(width: PointerWidth) -> Self {
        let mut types: IndexMap<String, TypeLayout> = IndexMap::new();
        for decl in MODEL_TYPES.iter() {
            let mut builder = LayoutBuilder::new(decl.name, width);
            if decl.vptr {
                builder = builder.with_vptr();
            }
            if let Some(base) = decl.base {
                let base_layout = types
                    .get(base)
                    .unwrap_or_else(|| panic!("base {} declared after {}", base, decl.name));
                builder = builder.extends(base_layout);
            }
            for (name, ty) in &decl.fields {
                builder = builder.field(name, ty.clone());
            }
            types.insert(decl.name.to_string(), builder.build());
        }
        log::debug!("built layout profile for {:?}: {} types", width, types.len());
        Self { width, types }
    }

    pub fn width(&self) -> PointerWidth {
        self.width
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn layout(&self, name: &str) -> Result<&TypeLayout, LayoutError> {
        self.types
            .get(name)
            .ok_or_else(|| LayoutError::UnknownType(name.to_string()))
    }

    pub fn offset_of(&self, type_name: &str, field: &str) -> Result<u64, LayoutError> {
        self.layout(type_name)?
            .offset_of(field)
            .ok_or_else(|| LayoutError::UnknownField(type_name.to_string(), field.to_string()))
    }

    pub fn size_of(&self, type_name: &str) -> Result<u64, LayoutError> {
        Ok(self.layout(type_name)?.size())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeLayout> {
        self.types.values()
    }

    /// Replace or add one type's layout, for a target build whose shape
    /// differs from the built-in tables.
    pub fn override_layout(&mut self, layout: TypeLayout) {
        self.types.insert(layout.name().to_string(), layout);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FieldType;

    #[test]
    fn test_header_layout_64() {
        let p = LayoutProfile::build(PointerWidth::P64);
        assert_eq!(p.offset_of("oopDesc", "_mark").unwrap(), 0);
        assert_eq!(p.offset_of("oopDesc", "_metadata").unwrap(), 8);
        assert_eq!(p.size_of("oopDesc").unwrap(), 16);
        // Variant headers add no named fields.
        assert_eq!(p.size_of("instanceOopDesc").unwrap(), 16);
        assert_eq!(p.offset_of("stackChunkOopDesc", "_mark").unwrap(), 0);
    }

    #[test]
    fn test_header_layout_32() {
        let p = LayoutProfile::build(PointerWidth::P32);
        assert_eq!(p.offset_of("oopDesc", "_metadata").unwrap(), 4);
        assert_eq!(p.size_of("oopDesc").unwrap(), 8);
    }

    #[test]
    fn test_klass_layout_64() {
        let p = LayoutProfile::build(PointerWidth::P64);
        assert_eq!(p.offset_of("Klass", "_layout_helper").unwrap(), 0);
        assert_eq!(p.offset_of("Klass", "_kind").unwrap(), 4);
        assert_eq!(p.offset_of("Klass", "_name").unwrap(), 16);
        assert_eq!(p.offset_of("Klass", "_secondary_super_cache").unwrap(), 24);
        assert_eq!(p.offset_of("Klass", "_primary_supers").unwrap(), 40);
        assert_eq!(p.offset_of("Klass", "_java_mirror").unwrap(), 104);
        assert_eq!(p.offset_of("Klass", "super").unwrap(), 112);
        assert_eq!(p.offset_of("Klass", "_trace_id").unwrap(), 160);
        assert_eq!(p.size_of("Klass").unwrap(), 176);
    }

    #[test]
    fn test_instance_klass_extends_klass() {
        let p = LayoutProfile::build(PointerWidth::P64);
        // Inherited fields resolve at base offsets.
        assert_eq!(p.offset_of("InstanceKlass", "_kind").unwrap(), 4);
        assert_eq!(p.offset_of("InstanceKlass", "_annotations").unwrap(), 176);
        assert_eq!(p.offset_of("InstanceKlass", "_init_state").unwrap(), 281);
        assert_eq!(p.offset_of("InstanceKlass", "_misc_flags").unwrap(), 284);
        assert_eq!(p.offset_of("InstanceKlass", "_methods").unwrap(), 384);
        assert_eq!(p.offset_of("InstanceKlass", "fields").unwrap(), 432);
        assert_eq!(p.size_of("InstanceKlass").unwrap(), 440);
        // Refinements add nothing.
        assert_eq!(p.size_of("InstanceMirrorKlass").unwrap(), 440);
    }

    #[test]
    fn test_array_klass_family() {
        let p = LayoutProfile::build(PointerWidth::P64);
        assert_eq!(p.offset_of("ArrayKlass", "_dimension").unwrap(), 176);
        assert_eq!(p.offset_of("ObjArrayKlass", "_element_class").unwrap(), 200);
        assert_eq!(p.offset_of("TypeArrayKlass", "_max_length").unwrap(), 200);
        assert_eq!(p.size_of("TypeArrayKlass").unwrap(), 208);
    }

    #[test]
    fn test_metadata_family_has_vptr_slot() {
        let p = LayoutProfile::build(PointerWidth::P64);
        assert!(p.layout("Method").unwrap().has_vptr());
        assert_eq!(p.offset_of("Method", "_constMethod").unwrap(), 8);
        assert_eq!(p.offset_of("Method", "_i2i_entry").unwrap(), 56);
        assert_eq!(p.size_of("Method").unwrap(), 88);
        assert_eq!(p.offset_of("MethodData", "_method").unwrap(), 8);
        assert_eq!(p.offset_of("ConstantPool", "_length").unwrap(), 60);
        assert_eq!(p.size_of("ConstantPool").unwrap(), 72);
        // Plain records start at zero.
        assert!(!p.layout("ConstMethod").unwrap().has_vptr());
        assert_eq!(p.offset_of("ConstMethod", "_fingerprint").unwrap(), 0);
        assert_eq!(p.offset_of("ConstMethod", "_orig_id_num").unwrap(), 46);
        assert_eq!(p.size_of("ConstMethod").unwrap(), 48);
    }

    #[test]
    fn test_symbol_packing() {
        let p = LayoutProfile::build(PointerWidth::P64);
        assert_eq!(p.offset_of("Symbol", "_hash_and_ref").unwrap(), 0);
        assert_eq!(p.offset_of("Symbol", "length").unwrap(), 4);
        assert_eq!(p.offset_of("Symbol", "body").unwrap(), 6);
        assert_eq!(p.size_of("Symbol").unwrap(), 8);
    }

    #[test]
    fn test_unknown_lookups_fail() {
        let p = LayoutProfile::build(PointerWidth::P64);
        assert!(matches!(p.layout("NoSuchType"), Err(LayoutError::UnknownType(_))));
        assert!(matches!(
            p.offset_of("Klass", "_no_such_field"),
            Err(LayoutError::UnknownField(_, _))
        ));
    }

    #[test]
    fn test_override_layout() {
        let mut p = LayoutProfile::build(PointerWidth::P64);
        let patched = LayoutBuilder::new("Symbol", PointerWidth::P64)
            .field("_hash_and_ref", FieldType::U4)
            .field("length", FieldType::U4)
            .field("body", FieldType::array_of(FieldType::U1, 2))
            .build();
        p.override_layout(patched);
        assert_eq!(p.offset_of("Symbol", "body").unwrap(), 8);
    }
}
