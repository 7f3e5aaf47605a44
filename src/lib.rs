// Mon Apr 13 2026 - Alex

//! Read-side mirror of a HotSpot-style JVM's object model: the heap-object
//! header hierarchy and the Klass/Metadata descriptor hierarchy, as typed
//! views over memory captured from a target process. The capture itself
//! (attach, core dump, remote read) is the embedder's job and arrives
//! through the MemoryReader trait; nothing here executes inside, links
//! against, or mutates the target.

#![allow(dead_code)]

pub mod config;
pub mod error;
pub mod image;
pub mod jtypes;
pub mod klass;
pub mod layout;
pub mod memory;
pub mod metadata;
pub mod oop;
pub mod validation;

#[cfg(test)]
pub(crate) mod testutil;

pub use config::{ImageConfig, RegionBounds};
pub use error::{ModelError, Result};
pub use image::RuntimeImage;
pub use jtypes::{CompressedEncoding, MarkWord, NarrowKlass, NarrowOop, OopHandle, PointerWidth};
pub use klass::{ClassState, InstanceKlassRef, KlassKind, KlassRef};
pub use layout::{LayoutProfile, SerializableLayout};
pub use memory::{Address, MemoryError, MemoryReader, MmapMemory, SnapshotMemory};
pub use metadata::{MetaArray, MetadataRef, MetaspaceObjType, MethodRef, SymbolRef};
pub use oop::{cast_from_oop, cast_to_oop, OopRef};
pub use validation::{LayoutChecker, ValidationReport};
