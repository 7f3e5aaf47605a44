// Fri Apr 17 2026 - Alex

use crate::error::Result;
use crate::oop::OopRef;
use bitflags::bitflags;
use std::fmt;
use std::ops::Deref;

bitflags! {
    /// Status bits of a continuation stack chunk. Read-only classification
    /// bits in this model; the claim/notify pair is handshake state for
    /// concurrent frame relativization inside the target.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChunkFlags: u8 {
        const HAS_INTERPRETED_FRAMES = 1 << 0;
        const CLAIM_RELATIVIZE = 1 << 1;
        const NOTIFY_RELATIVIZE = 1 << 2;
        const GC_MODE = 1 << 3;
        const HAS_BITMAP = 1 << 4;
    }
}

impl ChunkFlags {
    pub fn from_raw(raw: u8) -> Self {
        Self::from_bits_retain(raw)
    }
}

/// A captured continuation stack segment. The frame data and the flag
/// byte's exact position follow per-build offsets; the flag encoding
/// itself is fixed and decoded here.
#[derive(Clone, Copy)]
pub struct StackChunkOopRef<'img> {
    oop: OopRef<'img>,
}

impl<'img> StackChunkOopRef<'img> {
    pub(crate) fn from_oop(oop: OopRef<'img>) -> Self {
        Self { oop }
    }

    pub fn oop(&self) -> &OopRef<'img> {
        &self.oop
    }

    pub fn decode_flags(raw: u8) -> ChunkFlags {
        ChunkFlags::from_raw(raw)
    }

    /// Byte offset of the chunk's stack area, a per-build config input.
    pub fn stack_offset(&self) -> Result<u64> {
        self.image()
            .config()
            .stack_chunk_stack_offset
            .ok_or(crate::error::ModelError::Unconfigured("stack-chunk stack offset"))
    }
}

impl<'img> Deref for StackChunkOopRef<'img> {
    type Target = OopRef<'img>;

    fn deref(&self) -> &Self::Target {
        &self.oop
    }
}

impl fmt::Debug for StackChunkOopRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StackChunkOopRef({})", self.address())
    }
}
