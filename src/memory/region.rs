// Mon Apr 13 2026 - Alex

use crate::memory::{Address, MemoryRange};
use std::fmt;

/// What a region of the capture held in the target process. The heap and
/// metaspace kinds drive the sanity checks on typed-view construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Heap,
    Metaspace,
    Code,
    Native,
    Unknown,
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Heap => "heap",
            Self::Metaspace => "metaspace",
            Self::Code => "code",
            Self::Native => "native",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone)]
pub struct MemoryRegion {
    range: MemoryRange,
    kind: RegionKind,
    name: String,
}

impl MemoryRegion {
    pub fn new(range: MemoryRange, kind: RegionKind, name: impl Into<String>) -> Self {
        Self { range, kind, name: name.into() }
    }

    pub fn range(&self) -> &MemoryRange {
        &self.range
    }

    pub fn kind(&self) -> RegionKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> Address {
        self.range.start()
    }

    pub fn end(&self) -> Address {
        self.range.end()
    }

    pub fn size(&self) -> u64 {
        self.range.size()
    }

    pub fn contains(&self, addr: Address) -> bool {
        self.range.contains(addr)
    }
}

impl fmt::Display for MemoryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.range, self.kind, self.name)
    }
}
