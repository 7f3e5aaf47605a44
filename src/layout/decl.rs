// Tue Apr 14 2026 - Alex

//! Declaration tables for every record the mirror models, in the target
//! runtime's own names and declaration order. Offsets are never written
//! here; the builder computes them per pointer width.
//!
//! The field sets are version-specific by nature. A capture from a build
//! this table does not match is caught by the validation module's golden
//! comparison, not by anything in this file.

use crate::layout::FieldType;
use once_cell::sync::Lazy;

pub(crate) struct TypeDecl {
    pub name: &'static str,
    pub base: Option<&'static str>,
    pub vptr: bool,
    pub fields: Vec<(&'static str, FieldType)>,
}

impl TypeDecl {
    fn new(
        name: &'static str,
        base: Option<&'static str>,
        vptr: bool,
        fields: Vec<(&'static str, FieldType)>,
    ) -> Self {
        Self { name, base, vptr, fields }
    }
}

use FieldType::{Bool, Mark, Pointer, S2, S4, U1, U2, U4, U8};

/// Every modeled type, bases before derived. Registration order is also
/// the order golden layout files are emitted in.
pub(crate) static MODEL_TYPES: Lazy<Vec<TypeDecl>> = Lazy::new(|| {
    vec![
        // Heap object headers. Instance state and array elements live past
        // the header at class-computed offsets and are not named fields.
        TypeDecl::new("oopDesc", None, false, vec![
            ("_mark", Mark),
            // Union of a direct Klass* and a narrow klass index; one
            // pointer slot either way.
            ("_metadata", Pointer),
        ]),
        TypeDecl::new("instanceOopDesc", Some("oopDesc"), false, vec![]),
        TypeDecl::new("arrayOopDesc", Some("oopDesc"), false, vec![]),
        TypeDecl::new("objArrayOopDesc", Some("arrayOopDesc"), false, vec![]),
        TypeDecl::new("typeArrayOopDesc", Some("arrayOopDesc"), false, vec![]),
        TypeDecl::new("stackChunkOopDesc", Some("instanceOopDesc"), false, vec![]),
        // Metaspace records without a polymorphic header.
        TypeDecl::new("Symbol", None, false, vec![
            ("_hash_and_ref", U4),
            ("length", U2),
            // Declared length 2; the real body runs `length` bytes.
            ("body", FieldType::array_of(U1, 2)),
        ]),
        TypeDecl::new("ConstMethod", None, false, vec![
            ("_fingerprint", U8),
            ("_constants", Pointer),
            ("_stackmap_data", Pointer),
            ("_constMethod_size", S4),
            ("_flags", U2),
            ("_result_size", U1),
            ("_code_size", U2),
            ("_name_index", U2),
            ("_signature_index", U2),
            ("_method_idnum", U2),
            ("_max_stack", U2),
            ("_max_locals", U2),
            ("_size_of_parameters", U2),
            ("_orig_id_num", U2),
        ]),
        TypeDecl::new("ConstantPoolCache", None, false, vec![
            ("_length", S4),
            ("_constant_pool", Pointer),
            ("_resolved_references", Pointer),
            ("_reference_map", Pointer),
            ("_archived_references_idx", S4),
        ]),
        TypeDecl::new("Annotations", None, false, vec![
            ("_class_annotations", Pointer),
            ("_fields_annotations", Pointer),
            ("_class_type_annotations", Pointer),
            ("_fields_type_annotations", Pointer),
        ]),
        TypeDecl::new("RecordComponent", None, false, vec![
            ("_annotations", Pointer),
            ("_type_annotations", Pointer),
            ("_name_index", U2),
            ("_descriptor_index", U2),
            ("_attributes_count", U2),
        ]),
        // The polymorphic metadata family carries the producer's vtable
        // pointer ahead of its fields.
        TypeDecl::new("Metadata", None, true, vec![]),
        TypeDecl::new("MethodData", Some("Metadata"), false, vec![
            ("_method", Pointer),
            ("_size", S4),
            ("_hint_di", S4),
        ]),
        TypeDecl::new("Method", Some("Metadata"), false, vec![
            ("_constMethod", Pointer),
            ("_method_data", Pointer),
            ("_method_counters", Pointer),
            ("_adapter", Pointer),
            ("_access_flags", S4),
            ("_vtable_index", S4),
            ("_intrinsic_id", U2),
            ("_flags", U2),
            ("_i2i_entry", Pointer),
            ("_from_compiled_entry", Pointer),
            ("_code", Pointer),
            ("_from_interpreted_entry", Pointer),
        ]),
        TypeDecl::new("ConstantPool", Some("Metadata"), false, vec![
            ("_tags", Pointer),
            ("_cache", Pointer),
            ("_pool_holder", Pointer),
            ("_operands", Pointer),
            ("_resolved_klasses", Pointer),
            ("_major_version", U2),
            ("_minor_version", U2),
            ("_generic_signature_idx", U2),
            ("_source_file_name_idx", U2),
            ("_flags", U2),
            ("_length", S4),
            // Union of resolved-reference length and version.
            ("_saved", S4),
        ]),
        // C-heap side records reachable from InstanceKlass.
        TypeDecl::new("JNIid", None, false, vec![
            ("_holder", Pointer),
            ("_next", Pointer),
            ("_offset", S4),
            ("_is_static_field_id", Bool),
        ]),
        TypeDecl::new("nmethodBucket", None, false, vec![
            ("_nmethod", Pointer),
            ("_count", S4),
            ("_next", Pointer),
            ("_purge_list_next", Pointer),
        ]),
        // The type-descriptor hierarchy.
        TypeDecl::new("Klass", None, false, vec![
            ("_layout_helper", S4),
            ("_kind", U4),
            ("_modifier_flags", S4),
            ("_super_check_offset", U4),
            ("_name", Pointer),
            ("_secondary_super_cache", Pointer),
            ("_secondary_supers", Pointer),
            ("_primary_supers", FieldType::array_of(Pointer, 8)),
            ("_java_mirror", Pointer),
            ("super", Pointer),
            ("_subklass", Pointer),
            ("_next_sibling", Pointer),
            ("_next_link", Pointer),
            ("_class_loader_data", Pointer),
            ("_vtable_len", S4),
            ("_access_flags", S4),
            ("_trace_id", U8),
            ("_shared_class_path_idx", S2),
            ("_shared_class_flags", U2),
            ("_archived_mirror_idx", S4),
        ]),
        TypeDecl::new("InstanceKlass", Some("Klass"), false, vec![
            ("_annotations", Pointer),
            ("_package_entry", Pointer),
            ("_array_klasses", Pointer),
            ("_constants", Pointer),
            ("_inner_classes", Pointer),
            ("_nest_members", Pointer),
            ("_nest_host", Pointer),
            ("_permitted_subclasses", Pointer),
            ("_record_components", Pointer),
            ("_source_debug_extension", Pointer),
            ("_nonstatic_field_size", S4),
            ("_static_field_size", S4),
            ("_nonstatic_oop_map_size", S4),
            ("_itable_len", S4),
            ("_nest_host_index", U2),
            ("_this_class_index", U2),
            ("_static_oop_field_count", U2),
            ("_idnum_allocated_count", U2),
            ("_is_marked_dependant", Bool),
            ("_init_state", U1),
            ("_reference_type", U2),
            ("_misc_flags", U2),
            ("_init_monitor", Pointer),
            ("_init_thread", Pointer),
            ("_oop_map_cache", Pointer),
            ("_jni_ids", Pointer),
            ("_methods_jmethod_ids", Pointer),
            ("_dep_context", Pointer),
            ("_dep_context_last_cleaned", U8),
            ("_osr_nmethods_head", Pointer),
            ("_breakpoints", Pointer),
            ("_previous_versions", Pointer),
            ("_cached_class_file", Pointer),
            ("_jvmti_cached_class_field_map", Pointer),
            ("_methods", Pointer),
            ("_default_methods", Pointer),
            ("_local_interfaces", Pointer),
            ("_transitive_interfaces", Pointer),
            ("_method_ordering", Pointer),
            ("_default_vtable_indices", Pointer),
            ("fields", Pointer),
        ]),
        TypeDecl::new("InstanceMirrorKlass", Some("InstanceKlass"), false, vec![]),
        TypeDecl::new("InstanceClassLoaderKlass", Some("InstanceKlass"), false, vec![]),
        TypeDecl::new("InstanceRefKlass", Some("InstanceKlass"), false, vec![]),
        TypeDecl::new("InstanceStackChunkKlass", Some("InstanceKlass"), false, vec![]),
        TypeDecl::new("ArrayKlass", Some("Klass"), false, vec![
            ("_dimension", S4),
            ("_higher_dimension", Pointer),
            ("_lower_dimension", Pointer),
        ]),
        TypeDecl::new("ObjArrayKlass", Some("ArrayKlass"), false, vec![
            ("_element_class", Pointer),
            ("_bottom_class", Pointer),
        ]),
        TypeDecl::new("TypeArrayKlass", Some("ArrayKlass"), false, vec![
            ("_max_length", S4),
        ]),
    ]
});
