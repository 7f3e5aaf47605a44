// Tue Apr 14 2026 - Alex

pub mod builder;
pub(crate) mod decl;
pub mod error;
pub mod field;
#[allow(clippy::module_inception)]
pub mod layout;
pub mod profile;
pub mod serializer;
pub mod type_info;

pub use builder::LayoutBuilder;
pub use error::LayoutError;
pub use field::FieldSpec;
pub use layout::TypeLayout;
pub use profile::LayoutProfile;
pub use serializer::{SerializableField, SerializableLayout};
pub use type_info::FieldType;
