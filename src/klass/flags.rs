// Wed Apr 15 2026 - Alex

use bitflags::bitflags;

bitflags! {
    /// JVM access/property flags as stored in descriptors and methods.
    /// Several bits are context-dependent in the class file format
    /// (SUPER/SYNCHRONIZED, BRIDGE/VOLATILE, VARARGS/TRANSIENT share
    /// values); both names are declared where that happens.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessFlags: u32 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const SUPER = 0x0020;
        const VOLATILE = 0x0040;
        const BRIDGE = 0x0040;
        const TRANSIENT = 0x0080;
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
        const MODULE = 0x8000;
    }
}

impl AccessFlags {
    pub fn from_jint(raw: i32) -> Self {
        Self::from_bits_retain(raw as u32)
    }

    pub fn is_interface(self) -> bool {
        self.contains(Self::INTERFACE)
    }

    pub fn is_abstract(self) -> bool {
        self.contains(Self::ABSTRACT)
    }

    pub fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    pub fn is_final(self) -> bool {
        self.contains(Self::FINAL)
    }

    pub fn is_native(self) -> bool {
        self.contains(Self::NATIVE)
    }

    pub fn is_public(self) -> bool {
        self.contains(Self::PUBLIC)
    }
}

bitflags! {
    /// Orthogonal boolean facts about a loaded class. Distinct from the
    /// initialization state machine; these bits never encode progress.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct InstanceKlassFlags: u16 {
        const REWRITTEN = 1 << 0;
        const HAS_NONSTATIC_FIELDS = 1 << 1;
        const SHOULD_VERIFY_CLASS = 1 << 2;
        const UNUSED = 1 << 3;
        const IS_CONTENDED = 1 << 4;
        const HAS_NONSTATIC_CONCRETE_METHODS = 1 << 5;
        const DECLARES_NONSTATIC_CONCRETE_METHODS = 1 << 6;
        const HAS_BEEN_REDEFINED = 1 << 7;
        const SHARED_LOADING_FAILED = 1 << 8;
        const IS_SCRATCH_CLASS = 1 << 9;
        const IS_SHARED_BOOT_CLASS = 1 << 10;
        const IS_SHARED_PLATFORM_CLASS = 1 << 11;
        const IS_SHARED_APP_CLASS = 1 << 12;
        const HAS_CONTENDED_ANNOTATIONS = 1 << 13;
    }
}

impl InstanceKlassFlags {
    pub fn from_raw(raw: u16) -> Self {
        Self::from_bits_retain(raw)
    }

    pub fn is_shared(self) -> bool {
        self.intersects(
            Self::IS_SHARED_BOOT_CLASS | Self::IS_SHARED_PLATFORM_CLASS | Self::IS_SHARED_APP_CLASS,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_flags() {
        let flags = AccessFlags::from_jint(0x0211);
        assert!(flags.is_public());
        assert!(flags.is_final());
        assert!(flags.is_interface());
        assert!(!flags.is_abstract());
    }

    #[test]
    fn test_unknown_bits_retained() {
        let flags = AccessFlags::from_jint(0x2000_0001i32);
        assert!(flags.is_public());
        assert_eq!(flags.bits(), 0x2000_0001);
    }

    #[test]
    fn test_misc_flags() {
        let flags = InstanceKlassFlags::from_raw((1 << 0) | (1 << 10));
        assert!(flags.contains(InstanceKlassFlags::REWRITTEN));
        assert!(flags.is_shared());
        assert!(!flags.contains(InstanceKlassFlags::HAS_BEEN_REDEFINED));
    }
}
