// Tue Apr 14 2026 - Alex

pub mod handles;
pub mod mark;
pub mod narrow;
pub mod prims;

pub use handles::{
    JArray, JBooleanArray, JByteArray, JCharArray, JClass, JDoubleArray, JFieldId, JFloatArray,
    JIntArray, JLongArray, JMethodId, JObject, JObjectArray, JShortArray, JString, JThrowable,
    OopHandle,
};
pub use mark::{LockState, MarkWord};
pub use narrow::{CompressedEncoding, NarrowKlass, NarrowOop};
pub use prims::{BasicType, PointerWidth};
