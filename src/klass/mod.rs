// Wed Apr 15 2026 - Alex

pub mod array;
pub mod flags;
pub mod instance;
pub mod kind;
pub mod klass_ref;
pub mod state;

pub use array::{ArrayKlassRef, ObjArrayKlassRef, TypeArrayKlassRef};
pub use flags::{AccessFlags, InstanceKlassFlags};
pub use instance::{
    InstanceClassLoaderKlassRef, InstanceKlassRef, InstanceMirrorKlassRef, InstanceRefKlassRef,
    InstanceStackChunkKlassRef,
};
pub use kind::{KlassKind, KLASS_KIND_COUNT};
pub use klass_ref::{KlassRef, PRIMARY_SUPER_LIMIT};
pub use state::{ClassState, ReferenceType};
