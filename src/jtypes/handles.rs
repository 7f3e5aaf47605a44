// Tue Apr 14 2026 - Alex

use crate::error::Result;
use crate::image::RuntimeImage;
use crate::memory::Address;
use crate::oop::OopRef;
use std::fmt;

/// A pointer to a slot that holds an object pointer. The extra indirection
/// is what lets the runtime relocate the object without invalidating native
/// code holding the handle; resolving reads the slot at capture time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OopHandle {
    location: Address,
}

impl OopHandle {
    pub fn new(location: Address) -> Self {
        Self { location }
    }

    pub fn location(&self) -> Address {
        self.location
    }

    pub fn is_null(&self) -> bool {
        self.location.is_null()
    }

    /// Reads the slot. A null handle or a null slot both resolve to None.
    pub fn resolve<'img>(&self, image: &'img RuntimeImage) -> Result<Option<OopRef<'img>>> {
        if self.location.is_null() {
            return Ok(None);
        }
        let target = image.read_ptr_at(self.location)?;
        if target.is_null() {
            return Ok(None);
        }
        Ok(Some(image.oop_at(target)?))
    }
}

impl fmt::Display for OopHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle:{}", self.location)
    }
}

/// Native-boundary object handle. The declared static type carries no
/// layout information; the specializations below are aliases, exactly as
/// the runtime's own headers declare them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct JObject(OopHandle);

impl JObject {
    pub fn new(handle: OopHandle) -> Self {
        Self(handle)
    }

    pub fn from_location(location: Address) -> Self {
        Self(OopHandle::new(location))
    }

    pub fn handle(&self) -> OopHandle {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    pub fn resolve<'img>(&self, image: &'img RuntimeImage) -> Result<Option<OopRef<'img>>> {
        self.0.resolve(image)
    }
}

pub type JClass = JObject;
pub type JThrowable = JObject;
pub type JString = JObject;
pub type JArray = JObject;
pub type JBooleanArray = JArray;
pub type JByteArray = JArray;
pub type JCharArray = JArray;
pub type JShortArray = JArray;
pub type JIntArray = JArray;
pub type JLongArray = JArray;
pub type JFloatArray = JArray;
pub type JDoubleArray = JArray;
pub type JObjectArray = JArray;

/// Opaque method identifier handed across the native boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct JMethodId(pub Address);

/// Opaque field identifier handed across the native boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct JFieldId(pub Address);
