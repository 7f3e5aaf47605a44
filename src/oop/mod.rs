// Fri Apr 17 2026 - Alex

pub mod chunk;
pub mod layout_helper;
pub mod oop_ref;
pub mod variants;

pub use chunk::{ChunkFlags, StackChunkOopRef};
pub use layout_helper::LayoutHelper;
pub use oop_ref::{cast_from_oop, cast_to_oop, OopRef};
pub use variants::{ArrayOopRef, InstanceOopRef, ObjArrayOopRef, TypeArrayOopRef};
